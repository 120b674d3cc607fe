/// 엔진이 인식하는 컨테이너 라벨 어휘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashLabel {
    /// 라우팅/대시보드 노출 여부 (`true`일 때만 활성)
    Enable,
    /// 공개 호스트 이름
    Route,
    /// 표시 이름
    Name,
    Category,
    Icon,
    /// 업스트림 포트 지정
    Port,
}

impl DashLabel {
    pub const ALL: [DashLabel; 6] = [
        DashLabel::Enable,
        DashLabel::Route,
        DashLabel::Name,
        DashLabel::Category,
        DashLabel::Icon,
        DashLabel::Port,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DashLabel::Enable => "ddash.enable",
            DashLabel::Route => "ddash.route",
            DashLabel::Name => "ddash.name",
            DashLabel::Category => "ddash.category",
            DashLabel::Icon => "ddash.icon",
            DashLabel::Port => "ddash.port",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.key() == key)
    }
}

/// 대시보드 자신의 컨테이너를 나타내는 이름 라벨 값
pub const SELF_NAME: &str = "D-Dash";

/// 이미지 이름으로 자기 자신을 식별할 때 쓰는 부분 문자열
pub const SELF_IMAGE_HINT: &str = "ddash";

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_ICON: &str = "LayoutGrid";

/// 라벨 값이 참인지 판단합니다. 대소문자 무관하게 `true`만 참입니다.
pub fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

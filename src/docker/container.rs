use bollard::models::{ContainerSummary, Port, PortTypeEnum};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::labels::{is_truthy, DashLabel};

/// 런타임이 보고한 컨테이너 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContainerState {
    Running,
    Exited,
    Restarting,
    #[default]
    Created,
    Paused,
    Removing,
    Dead,
}

impl ContainerState {
    /// 런타임 상태 문자열을 변환합니다. 알 수 없는 값은 `Created`로 취급합니다.
    pub fn from_runtime(state: &str) -> Self {
        match state.to_ascii_lowercase().as_str() {
            "running" => ContainerState::Running,
            "exited" => ContainerState::Exited,
            "restarting" => ContainerState::Restarting,
            "paused" => ContainerState::Paused,
            "removing" => ContainerState::Removing,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Created,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerState::Running => "running",
            ContainerState::Exited => "exited",
            ContainerState::Restarting => "restarting",
            ContainerState::Created => "created",
            ContainerState::Paused => "paused",
            ContainerState::Removing => "removing",
            ContainerState::Dead => "dead",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedPort {
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: Protocol,
}

impl ExposedPort {
    pub fn tcp(private_port: u16) -> Self {
        Self {
            private_port,
            public_port: None,
            protocol: Protocol::Tcp,
        }
    }
}

impl From<Port> for ExposedPort {
    fn from(port: Port) -> Self {
        let protocol = match port.typ {
            Some(PortTypeEnum::UDP) => Protocol::Udp,
            Some(PortTypeEnum::SCTP) => Protocol::Sctp,
            _ => Protocol::Tcp,
        };
        Self {
            private_port: port.private_port,
            public_port: port.public_port,
            protocol,
        }
    }
}

/// 컨테이너의 네트워크 스택 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode<'a> {
    /// 기본 bridge 또는 사용자 정의 네트워크
    Default,
    /// 호스트 네트워크 공유
    Host,
    /// 다른 컨테이너의 네트워크 스택 공유 (`container:<id 또는 이름>`)
    Container(&'a str),
}

impl<'a> NetworkMode<'a> {
    pub fn parse(mode: Option<&'a str>) -> Self {
        match mode {
            Some("host") => NetworkMode::Host,
            Some(mode) => match mode.strip_prefix("container:") {
                Some(target) => NetworkMode::Container(target),
                None => NetworkMode::Default,
            },
            None => NetworkMode::Default,
        }
    }
}

impl fmt::Display for NetworkMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkMode::Default => f.write_str("default"),
            NetworkMode::Host => f.write_str("host"),
            NetworkMode::Container(target) => write!(f, "container:{}", target),
        }
    }
}

/// 런타임이 보고한 컨테이너 스냅샷. 엔진은 읽기만 합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: ContainerState,
    pub ports: Vec<ExposedPort>,
    pub labels: HashMap<String, String>,
    pub network_mode: Option<String>,
}

impl Container {
    /// 첫 번째 이름에서 앞의 '/'를 뗀 값, 이름이 없으면 id
    pub fn preferred_name(&self) -> &str {
        self.names
            .first()
            .map(|name| name.strip_prefix('/').unwrap_or(name))
            .unwrap_or(&self.id)
    }

    pub fn label(&self, label: DashLabel) -> Option<&str> {
        self.labels.get(label.key()).map(String::as_str)
    }

    pub fn is_enabled(&self) -> bool {
        self.label(DashLabel::Enable).map(is_truthy).unwrap_or(false)
    }

    /// 공백뿐인 route 라벨은 없는 것으로 봅니다.
    pub fn route_host(&self) -> Option<&str> {
        self.label(DashLabel::Route)
            .map(str::trim)
            .filter(|host| !host.is_empty())
    }

    pub fn network_mode(&self) -> NetworkMode<'_> {
        NetworkMode::parse(self.network_mode.as_deref())
    }

    /// 중복을 제거한 private 포트 목록 (오름차순)
    pub fn private_ports(&self) -> BTreeSet<u16> {
        self.ports.iter().map(|port| port.private_port).collect()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names
            .iter()
            .any(|candidate| candidate.strip_prefix('/').unwrap_or(candidate) == name)
    }

    /// `container:<ref>`의 대상을 찾습니다.
    ///
    /// id 전체 일치, 이름 일치, id 접두사 순으로 보며 접두사는 한 컨테이너에만 맞을 때 인정합니다.
    pub fn find_by_reference<'a>(all: &'a [Container], reference: &str) -> Option<&'a Container> {
        if reference.is_empty() {
            return None;
        }
        if let Some(found) = all.iter().find(|c| c.id == reference) {
            return Some(found);
        }
        if let Some(found) = all.iter().find(|c| c.has_name(reference)) {
            return Some(found);
        }

        let mut prefixed = all.iter().filter(|c| c.id.starts_with(reference));
        match (prefixed.next(), prefixed.next()) {
            (Some(found), None) => Some(found),
            _ => None,
        }
    }
}

impl From<ContainerSummary> for Container {
    fn from(summary: ContainerSummary) -> Self {
        Self {
            id: summary.id.unwrap_or_default(),
            names: summary.names.unwrap_or_default(),
            image: summary.image.unwrap_or_default(),
            state: summary
                .state
                .as_deref()
                .map(ContainerState::from_runtime)
                .unwrap_or_default(),
            ports: summary
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(ExposedPort::from)
                .collect(),
            labels: summary.labels.unwrap_or_default(),
            network_mode: summary.host_config.and_then(|config| config.network_mode),
        }
    }
}

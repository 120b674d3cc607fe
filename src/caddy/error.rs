use std::fmt;

#[derive(Debug)]
pub enum CaddyError {
    /// 요청 생성 실패
    RequestBuild {
        path: String,
        reason: String,
    },
    /// 관리 API 연결/전송 실패
    Transport {
        path: String,
        source: hyper_util::client::legacy::Error,
    },
    Timeout {
        path: String,
        timeout_secs: u64,
    },
    /// 2xx가 아닌 응답
    Status {
        path: String,
        status: u16,
        body: String,
    },
    /// 응답 본문 읽기 실패
    Body {
        path: String,
        source: hyper::Error,
    },
    Json {
        path: String,
        source: serde_json::Error,
    },
    /// 설정 저장 파일 쓰기 실패
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for CaddyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaddyError::RequestBuild { path, reason } =>
                write!(f, "Caddy 요청 {} 생성 실패: {}", path, reason),
            CaddyError::Transport { path, source } =>
                write!(f, "Caddy 관리 API {} 연결 실패: {}", path, source),
            CaddyError::Timeout { path, timeout_secs } =>
                write!(f, "Caddy 관리 API {} 타임아웃 ({}초)", path, timeout_secs),
            CaddyError::Status { path, status, body } =>
                write!(f, "Caddy 관리 API {} 응답 오류 {}: {}", path, status, body),
            CaddyError::Body { path, source } =>
                write!(f, "Caddy 응답 {} 본문 읽기 실패: {}", path, source),
            CaddyError::Json { path, source } =>
                write!(f, "Caddy 응답 {} JSON 처리 실패: {}", path, source),
            CaddyError::Io { path, source } =>
                write!(f, "Caddy 설정 파일 {} 쓰기 실패: {}", path, source),
        }
    }
}

impl std::error::Error for CaddyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaddyError::Transport { source, .. } => Some(source),
            CaddyError::Body { source, .. } => Some(source),
            CaddyError::Json { source, .. } => Some(source),
            CaddyError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

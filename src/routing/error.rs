use std::fmt;

/// 업스트림 결정 실패 원인. 컨테이너 하나에만 해당하며 패스를 중단하지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// host/container 네트워크 모드인데 port 라벨이 없음
    MissingPortLabel {
        container: String,
        network_mode: String,
    },
    /// port 라벨 값이 포트 번호가 아님
    InvalidPortLabel {
        container: String,
        value: String,
    },
    /// 노출된 포트도, port 라벨도 없음
    NoExposedPorts {
        container: String,
    },
    /// 서로 다른 private 포트가 여러 개라 라벨 없이는 고를 수 없음
    AmbiguousPorts {
        container: String,
        ports: Vec<u16>,
    },
    /// `container:` 뒤에 대상이 비어있음
    InvalidNetworkMode {
        container: String,
        network_mode: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::MissingPortLabel { container, network_mode } =>
                write!(f, "컨테이너 {}: 네트워크 모드 '{}'에는 ddash.port 라벨이 필요함", container, network_mode),
            ResolveError::InvalidPortLabel { container, value } =>
                write!(f, "컨테이너 {}: ddash.port 값 '{}'이 유효한 포트가 아님", container, value),
            ResolveError::NoExposedPorts { container } =>
                write!(f, "컨테이너 {}: 노출된 포트와 ddash.port 라벨이 모두 없음", container),
            ResolveError::AmbiguousPorts { container, ports } =>
                write!(f, "컨테이너 {}: 노출된 포트가 여러 개임 {:?}, ddash.port 라벨 필요", container, ports),
            ResolveError::InvalidNetworkMode { container, network_mode } =>
                write!(f, "컨테이너 {}: 잘못된 네트워크 모드 '{}'", container, network_mode),
        }
    }
}

impl std::error::Error for ResolveError {}

use std::fmt;

#[derive(Debug)]
pub enum DockerError {
    /// Docker 데몬 연결 실패
    ConnectionError {
        source: bollard::errors::Error,
        context: String,
    },
    /// 컨테이너 목록 조회 실패
    ListContainersError {
        source: bollard::errors::Error,
        context: String,
    },
    /// 이벤트 스트림 오류
    EventStreamError {
        source: bollard::errors::Error,
        context: String,
    },
    /// 컨테이너 명령(시작/중지/재시작/로그) 실패
    ContainerCommandError {
        container_id: String,
        source: bollard::errors::Error,
        context: String,
    },
}

impl fmt::Display for DockerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerError::ConnectionError { source, context } =>
                write!(f, "Docker 데몬 연결 실패 ({}): {}", context, source),
            DockerError::ListContainersError { source, context } =>
                write!(f, "컨테이너 목록 조회 실패 ({}): {}", context, source),
            DockerError::EventStreamError { source, context } =>
                write!(f, "Docker 이벤트 스트림 오류 ({}): {}", context, source),
            DockerError::ContainerCommandError { container_id, source, context } =>
                write!(f, "컨테이너 {} 명령 실패 ({}): {}", container_id, context, source),
        }
    }
}

impl std::error::Error for DockerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DockerError::ConnectionError { source, .. }
            | DockerError::ListContainersError { source, .. }
            | DockerError::EventStreamError { source, .. }
            | DockerError::ContainerCommandError { source, .. } => Some(source),
        }
    }
}

impl From<bollard::errors::Error> for DockerError {
    fn from(err: bollard::errors::Error) -> Self {
        DockerError::ConnectionError {
            source: err,
            context: "Docker 데몬 연결 실패".to_string(),
        }
    }
}

use async_trait::async_trait;
use bollard::container::{
    ListContainersOptions, LogsOptions, RestartContainerOptions, StartContainerOptions,
    StopContainerOptions,
};
use bollard::system::EventsOptions;
use bollard::{Docker, API_DEFAULT_VERSION};
use futures_util::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;
use tracing::{debug, info};

use super::container::Container;
use super::events_types::{ContainerAction, RawEvent};
use super::logs::{strip_ansi_codes, LogOptions};
use super::DockerError;
use crate::settings::DockerSettings;

pub type EventStream = Pin<Box<dyn Stream<Item = Result<RawEvent, DockerError>> + Send>>;
pub type LogStream = Pin<Box<dyn Stream<Item = Result<String, DockerError>> + Send>>;

/// 재동기화 엔진이 사용하는 컨테이너 레지스트리 인터페이스
#[async_trait]
pub trait DockerClient: Send + Sync {
    async fn list_containers(&self) -> Result<Vec<Container>, DockerError>;

    /// 데몬 응답 여부. 실패는 `false`로 돌려줍니다.
    async fn ping(&self) -> bool;

    /// 컨테이너 생명주기 이벤트 스트림. 첫 poll 시점에 연결됩니다.
    fn events(&self) -> EventStream;
}

/// 대시보드가 전달하는 컨테이너 명령. 재동기화 범위 밖입니다.
#[async_trait]
pub trait ContainerControl: Send + Sync {
    fn container_logs(&self, container_id: &str, options: &LogOptions) -> LogStream;

    async fn start_container(&self, container_id: &str) -> Result<(), DockerError>;

    async fn stop_container(&self, container_id: &str) -> Result<(), DockerError>;

    async fn restart_container(&self, container_id: &str) -> Result<(), DockerError>;
}

const CONNECT_TIMEOUT_SECS: u64 = 120;

/// bollard 기반 Docker 클라이언트
#[derive(Clone)]
pub struct BollardDockerClient {
    docker: Docker,
}

impl BollardDockerClient {
    pub fn connect(settings: &DockerSettings) -> Result<Self, DockerError> {
        let docker = Docker::connect_with_socket(&settings.socket, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
            .map_err(|e| DockerError::ConnectionError {
                source: e,
                context: format!("소켓 {}", settings.socket),
            })?;
        info!(socket = %settings.socket, "Docker 클라이언트 생성");
        Ok(Self { docker })
    }

    fn create_event_filters() -> HashMap<String, Vec<String>> {
        let mut filters = HashMap::new();
        filters.insert(
            "type".to_string(),
            vec!["container".to_string()]
        );
        filters.insert(
            "event".to_string(),
            ContainerAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
        );
        filters
    }

    fn command_error(container_id: &str, context: &str) -> impl FnOnce(bollard::errors::Error) -> DockerError {
        let container_id = container_id.to_string();
        let context = context.to_string();
        move |source| DockerError::ContainerCommandError {
            container_id,
            source,
            context,
        }
    }
}

#[async_trait]
impl DockerClient for BollardDockerClient {
    async fn list_containers(&self) -> Result<Vec<Container>, DockerError> {
        let options = Some(ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        });

        let summaries = self.docker.list_containers(options).await
            .map_err(|e| DockerError::ListContainersError {
                source: e,
                context: "전체 컨테이너 조회".to_string(),
            })?;

        debug!(count = summaries.len(), "컨테이너 목록 조회 성공");
        Ok(summaries.into_iter().map(Container::from).collect())
    }

    async fn ping(&self) -> bool {
        match self.docker.ping().await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Docker ping 실패");
                false
            }
        }
    }

    fn events(&self) -> EventStream {
        let options = EventsOptions::<String> {
            filters: Self::create_event_filters(),
            ..Default::default()
        };

        let stream = self.docker.events(Some(options)).map(|item| match item {
            Ok(message) => Ok(RawEvent::from(message)),
            Err(e) => Err(DockerError::EventStreamError {
                source: e,
                context: "Docker 이벤트 구독".to_string(),
            }),
        });

        Box::pin(stream)
    }
}

#[async_trait]
impl ContainerControl for BollardDockerClient {
    fn container_logs(&self, container_id: &str, options: &LogOptions) -> LogStream {
        let logs_options = LogsOptions::<String> {
            follow: options.follow,
            stdout: true,
            stderr: true,
            timestamps: options.timestamps,
            tail: options.tail.to_string(),
            ..Default::default()
        };

        let id = container_id.to_string();
        let stream = self.docker.logs(container_id, Some(logs_options)).map(move |item| match item {
            Ok(output) => Ok(strip_ansi_codes(&String::from_utf8_lossy(&output.into_bytes()))),
            Err(e) => Err(DockerError::ContainerCommandError {
                container_id: id.clone(),
                source: e,
                context: "로그 스트림".to_string(),
            }),
        });

        Box::pin(stream)
    }

    async fn start_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.docker
            .start_container(container_id, None::<StartContainerOptions<String>>)
            .await
            .map_err(Self::command_error(container_id, "시작"))?;
        info!(container_id = %container_id, "컨테이너 시작 요청 완료");
        Ok(())
    }

    async fn stop_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.docker
            .stop_container(container_id, None::<StopContainerOptions>)
            .await
            .map_err(Self::command_error(container_id, "중지"))?;
        info!(container_id = %container_id, "컨테이너 중지 요청 완료");
        Ok(())
    }

    async fn restart_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.docker
            .restart_container(container_id, None::<RestartContainerOptions>)
            .await
            .map_err(Self::command_error(container_id, "재시작"))?;
        info!(container_id = %container_id, "컨테이너 재시작 요청 완료");
        Ok(())
    }
}

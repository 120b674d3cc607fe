//! 대시보드에 보여줄 앱 목록과 컨테이너 제어.
//!
//! 이 크레이트는 HTTP 서버를 띄우지 않습니다. `AppService`는 외부 대시보드 서버가
//! 가져다 붙이는 진입점이며 `ddash` 바이너리는 이를 만들지 않습니다.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::docker::labels::{DashLabel, DEFAULT_CATEGORY, DEFAULT_ICON};
use crate::docker::{Container, ContainerControl, ContainerState, DockerClient, DockerError, LogOptions, LogStream};
use crate::settings::Settings;

/// 대시보드 카드 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppData {
    pub id: String,
    pub name: String,
    /// route 라벨이 없으면 빈 문자열
    pub url: String,
    pub category: String,
    pub status: ContainerState,
    pub icon: String,
}

pub struct AppService {
    docker: Arc<dyn DockerClient>,
    control: Arc<dyn ContainerControl>,
    secure_routing: bool,
}

impl AppService {
    pub fn new(docker: Arc<dyn DockerClient>, control: Arc<dyn ContainerControl>, settings: &Settings) -> Self {
        Self {
            docker,
            control,
            secure_routing: settings.caddy.secure_routing,
        }
    }

    /// `ddash.enable=true`인 컨테이너 목록. 조회에 실패하면 빈 목록입니다.
    pub async fn apps(&self) -> Vec<AppData> {
        match self.docker.list_containers().await {
            Ok(containers) => containers
                .iter()
                .filter(|container| container.is_enabled())
                .map(|container| self.to_app_data(container))
                .collect(),
            Err(e) => {
                error!(error = %e, "앱 목록 조회 실패");
                Vec::new()
            }
        }
    }

    pub fn to_app_data(&self, container: &Container) -> AppData {
        let scheme = if self.secure_routing { "https" } else { "http" };

        AppData {
            id: container.id.clone(),
            name: container
                .label(DashLabel::Name)
                .unwrap_or_else(|| container.preferred_name())
                .to_string(),
            url: container
                .route_host()
                .map(|host| format!("{}://{}", scheme, host))
                .unwrap_or_default(),
            category: container
                .label(DashLabel::Category)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            status: container.state,
            icon: container.label(DashLabel::Icon).unwrap_or(DEFAULT_ICON).to_string(),
        }
    }

    /// ANSI 색상 코드가 제거된 로그 스트림
    pub fn logs(&self, container_id: &str, timestamps: bool) -> LogStream {
        let options = LogOptions {
            timestamps,
            ..Default::default()
        };
        self.control.container_logs(container_id, &options)
    }

    pub async fn start(&self, container_id: &str) -> Result<(), DockerError> {
        info!(container_id = %container_id, "앱 시작");
        self.control.start_container(container_id).await
    }

    pub async fn stop(&self, container_id: &str) -> Result<(), DockerError> {
        info!(container_id = %container_id, "앱 중지");
        self.control.stop_container(container_id).await
    }

    pub async fn restart(&self, container_id: &str) -> Result<(), DockerError> {
        info!(container_id = %container_id, "앱 재시작");
        self.control.restart_container(container_id).await
    }
}

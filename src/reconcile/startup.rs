use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::reconciler::{PassOutcome, Reconciler};
use super::subscriber::{EventSubscriber, SubscriberHandle, SubscriberState};
use crate::caddy::CaddyApi;
use crate::docker::DockerClient;
use crate::settings::{DockerSettings, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    Init,
    Checking,
    Ready,
    /// 의존성 중 하나 이상에 연결하지 못함
    Degraded,
}

/// 시작 점검 실패. 어느 쪽이 닿지 않았는지 담고 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupError {
    pub docker_reachable: bool,
    pub caddy_reachable: bool,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut failed = Vec::new();
        if !self.docker_reachable {
            failed.push("Docker");
        }
        if !self.caddy_reachable {
            failed.push("Caddy");
        }
        write!(f, "시작 점검 실패: {} 연결 불가", failed.join(", "))
    }
}

impl std::error::Error for StartupError {}

/// 의존성 점검 → 초기 재동기화 → 이벤트 구독 시작
pub struct StartupCoordinator {
    docker: Arc<dyn DockerClient>,
    caddy: Arc<dyn CaddyApi>,
    reconciler: Arc<Reconciler>,
    docker_settings: DockerSettings,
    state: StartupState,
    subscriber: Option<SubscriberHandle>,
}

impl StartupCoordinator {
    pub fn new(docker: Arc<dyn DockerClient>, caddy: Arc<dyn CaddyApi>, settings: &Settings) -> Self {
        let reconciler = Arc::new(Reconciler::new(docker.clone(), caddy.clone(), settings));
        Self {
            docker,
            caddy,
            reconciler,
            docker_settings: settings.docker.clone(),
            state: StartupState::Init,
            subscriber: None,
        }
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    pub fn reconciler(&self) -> Arc<Reconciler> {
        self.reconciler.clone()
    }

    pub fn subscriber_state(&self) -> Option<SubscriberState> {
        self.subscriber.as_ref().map(SubscriberHandle::state)
    }

    /// 두 의존성이 모두 응답하면 초기 패스를 실행하고 구독을 시작합니다.
    /// 실패하면 `Degraded`로 남고 다시 호출할 수 있습니다.
    pub async fn run(&mut self) -> Result<Option<PassOutcome>, StartupError> {
        if self.state == StartupState::Ready {
            warn!("이미 시작됨, 다시 실행하지 않음");
            return Ok(None);
        }

        self.state = StartupState::Checking;
        info!("의존성 연결 확인 중");

        let (docker_reachable, caddy_reachable) =
            tokio::join!(self.docker.ping(), self.caddy.check_connectivity());

        if !docker_reachable {
            error!("Docker 데몬에 연결할 수 없음");
        }
        if !caddy_reachable {
            error!("Caddy 관리 API에 연결할 수 없음");
        }
        if !(docker_reachable && caddy_reachable) {
            self.state = StartupState::Degraded;
            return Err(StartupError {
                docker_reachable,
                caddy_reachable,
            });
        }

        info!("의존성 확인 완료, 초기 재동기화 실행");
        let outcome = self.reconciler.reconcile().await;

        let subscriber = EventSubscriber::new(self.docker.clone(), self.reconciler.clone(), &self.docker_settings);
        self.subscriber = Some(subscriber.spawn());
        self.state = StartupState::Ready;
        info!("시작 완료");

        Ok(Some(outcome))
    }

    /// 이벤트 구독을 멈춥니다. 시작 전이거나 이미 멈췄으면 아무것도 하지 않습니다.
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.subscriber.take() {
            info!("이벤트 구독 종료 중");
            handle.shutdown().await;
        }
    }
}

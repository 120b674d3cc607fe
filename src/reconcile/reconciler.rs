use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::caddy::CaddyApi;
use crate::docker::{Container, DockerClient};
use crate::routing::{Route, RouteResolver};
use crate::settings::Settings;

/// 한 번의 재동기화 패스 결과. 로깅과 테스트용이며 제어 흐름에는 쓰지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// 컨테이너 목록 조회 실패로 중단됨
    Aborted,
    /// 라우팅 대상 컨테이너 없음
    NoEligibleContainers,
    Applied(PassSummary),
}

impl PassOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, PassOutcome::Applied(summary) if !summary.added.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// enable + route 라벨을 가진 컨테이너 수
    pub eligible: usize,
    pub added: Vec<Route>,
    /// 프록시에 이미 있어서 건너뛴 호스트
    pub already_present: Vec<String>,
    /// 업스트림을 정하지 못한 호스트
    pub unresolved: Vec<String>,
    /// 라우트 추가 요청이 실패한 호스트
    pub failed: Vec<String>,
    pub saved: bool,
}

/// 컨테이너 목록 → 라우트 계산 → 프록시와 비교 → 누락분 추가 → (선택) 저장.
///
/// 백그라운드 상태는 없고, 패스끼리는 내부 게이트로 직렬화됩니다.
pub struct Reconciler {
    docker: Arc<dyn DockerClient>,
    caddy: Arc<dyn CaddyApi>,
    resolver: RouteResolver,
    auto_save: bool,
    gate: Mutex<()>,
}

impl Reconciler {
    pub fn new(docker: Arc<dyn DockerClient>, caddy: Arc<dyn CaddyApi>, settings: &Settings) -> Self {
        Self::with_resolver(
            docker,
            caddy,
            RouteResolver::new(settings),
            settings.caddy.auto_save_config,
        )
    }

    pub fn with_resolver(
        docker: Arc<dyn DockerClient>,
        caddy: Arc<dyn CaddyApi>,
        resolver: RouteResolver,
        auto_save: bool,
    ) -> Self {
        Self {
            docker,
            caddy,
            resolver,
            auto_save,
            gate: Mutex::new(()),
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn reconcile(&self) -> PassOutcome {
        let _pass = self.gate.lock().await;

        let containers = match self.docker.list_containers().await {
            Ok(containers) => containers,
            Err(e) => {
                error!(error = %e, "컨테이너 목록 조회 실패, 이번 패스 중단");
                return PassOutcome::Aborted;
            }
        };

        let eligible: Vec<&Container> = containers
            .iter()
            .filter(|container| container.is_enabled() && container.route_host().is_some())
            .collect();

        if eligible.is_empty() {
            info!(total = containers.len(), "ddash.route 라벨이 있는 컨테이너 없음");
            return PassOutcome::NoEligibleContainers;
        }

        let current_routes = self.fetch_current_routes().await;
        let mut summary = PassSummary {
            eligible: eligible.len(),
            ..Default::default()
        };
        let mut seen_hosts = HashSet::new();

        for container in eligible {
            let Some(host) = container.route_host() else {
                continue;
            };
            let name = container.preferred_name();

            if !seen_hosts.insert(host) {
                warn!(host = %host, container = %name, "같은 패스에 중복된 route 호스트");
            }

            if current_routes.contains(host) {
                debug!(host = %host, container = %name, "Caddy에 이미 라우트가 있음");
                summary.already_present.push(host.to_string());
                continue;
            }

            let upstream = match self.resolver.resolve(container, &containers) {
                Ok(upstream) => upstream,
                Err(e) => {
                    error!(error = %e, host = %host, "업스트림 결정 실패, 라우트 건너뜀");
                    summary.unresolved.push(host.to_string());
                    continue;
                }
            };

            match self.caddy.add_route(host, &upstream.to_string()).await {
                Ok(()) => {
                    info!(host = %host, upstream = %upstream, container = %name, "라우트 추가");
                    summary.added.push(Route {
                        host: host.to_string(),
                        upstream,
                    });
                }
                Err(e) => {
                    error!(error = %e, host = %host, upstream = %upstream, "라우트 추가 실패");
                    summary.failed.push(host.to_string());
                }
            }
        }

        if !summary.added.is_empty() && self.auto_save {
            match self.caddy.save_config().await {
                Ok(()) => summary.saved = true,
                Err(e) => error!(error = %e, "Caddy 설정 저장 실패"),
            }
        }

        info!(
            eligible = summary.eligible,
            added = summary.added.len(),
            already_present = summary.already_present.len(),
            unresolved = summary.unresolved.len(),
            failed = summary.failed.len(),
            saved = summary.saved,
            "재동기화 패스 완료"
        );

        PassOutcome::Applied(summary)
    }

    /// 조회 실패 시 빈 스냅샷으로 진행합니다.
    async fn fetch_current_routes(&self) -> HashSet<String> {
        match self.caddy.get_routes().await {
            Ok(routes) => routes.into_iter().collect(),
            Err(e) => {
                error!(error = %e, "Caddy 라우트 조회 실패, 빈 목록으로 진행");
                HashSet::new()
            }
        }
    }
}

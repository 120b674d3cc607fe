use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use ddash::caddy::{CaddyApi, HttpCaddyApi};
use ddash::docker::{BollardDockerClient, DockerClient};
use ddash::logging::init_logging;
use ddash::reconcile::StartupCoordinator;
use ddash::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_logging(&settings.logging);
    info!(
        docker_socket = %settings.docker.socket,
        caddy_admin = %settings.caddy.admin_url,
        "ddash 시작"
    );

    let docker: Arc<dyn DockerClient> = match BollardDockerClient::connect(&settings.docker) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Docker 클라이언트 생성 실패");
            return ExitCode::FAILURE;
        }
    };
    let caddy: Arc<dyn CaddyApi> = Arc::new(HttpCaddyApi::new(settings.caddy.clone()));

    let mut coordinator = StartupCoordinator::new(docker, caddy, &settings);
    if let Err(e) = coordinator.run().await {
        error!(error = %e, "시작 점검 실패, 종료합니다");
        return ExitCode::FAILURE;
    }

    wait_for_signal().await;
    info!("종료 신호 수신");
    coordinator.shutdown().await;
    info!("ddash 종료");

    ExitCode::SUCCESS
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            error!(error = %e, "SIGTERM 핸들러 설치 실패, Ctrl-C만 대기");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

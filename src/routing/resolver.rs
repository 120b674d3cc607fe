use crate::docker::labels::{DashLabel, SELF_IMAGE_HINT, SELF_NAME};
use crate::docker::{Container, NetworkMode};
use crate::settings::Settings;

use super::{ResolveError, Upstream};

/// 대시보드 자신에게 가는 업스트림의 호스트
const SELF_HOST: &str = "localhost";

/// 컨테이너 하나를 업스트림 주소로 바꾸는 순수 함수 모음.
///
/// 우선순위:
/// 1. 대시보드 자신이면 `localhost:<server.port>`
/// 2. `host` 모드: 호스트 별칭 + port 라벨 (필수)
/// 3. `container:<ref>` 모드: 대상 컨테이너 이름(없으면 ref 그대로) + port 라벨 (필수)
/// 4. 그 외: 자기 이름 + port 라벨, 없으면 유일한 private 포트
#[derive(Debug, Clone)]
pub struct RouteResolver {
    self_port: u16,
    host_alias: String,
}

impl RouteResolver {
    pub fn new(settings: &Settings) -> Self {
        Self::with_parts(settings.server.port, settings.docker.host_alias.clone())
    }

    pub fn with_parts(self_port: u16, host_alias: impl Into<String>) -> Self {
        Self {
            self_port,
            host_alias: host_alias.into(),
        }
    }

    pub fn host_alias(&self) -> &str {
        &self.host_alias
    }

    /// `all`은 같은 패스에서 조회한 전체 컨테이너 목록입니다.
    pub fn resolve(&self, container: &Container, all: &[Container]) -> Result<Upstream, ResolveError> {
        if is_self(container) {
            return Ok(Upstream::new(SELF_HOST, self.self_port));
        }

        let mode = container.network_mode();
        match mode {
            NetworkMode::Host => {
                let port = required_port_label(container, mode)?;
                Ok(Upstream::new(self.host_alias.as_str(), port))
            }
            NetworkMode::Container(reference) => {
                if reference.is_empty() {
                    return Err(ResolveError::InvalidNetworkMode {
                        container: container.preferred_name().to_string(),
                        network_mode: mode.to_string(),
                    });
                }
                let port = required_port_label(container, mode)?;
                let host = Container::find_by_reference(all, reference)
                    .map(Container::preferred_name)
                    .unwrap_or(reference);
                Ok(Upstream::new(host, port))
            }
            NetworkMode::Default => {
                let port = bridge_port(container)?;
                Ok(Upstream::new(container.preferred_name(), port))
            }
        }
    }
}

/// 이름 라벨이 `D-Dash`이거나 이미지 이름에 `ddash`가 들어가면 자기 자신으로 봅니다.
pub fn is_self(container: &Container) -> bool {
    container.label(DashLabel::Name) == Some(SELF_NAME)
        || container.image.to_lowercase().contains(SELF_IMAGE_HINT)
}

fn port_label(container: &Container) -> Option<Result<u16, ResolveError>> {
    container.label(DashLabel::Port).map(|value| {
        value
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| ResolveError::InvalidPortLabel {
                container: container.preferred_name().to_string(),
                value: value.to_string(),
            })
    })
}

fn required_port_label(container: &Container, mode: NetworkMode<'_>) -> Result<u16, ResolveError> {
    port_label(container).unwrap_or_else(|| {
        Err(ResolveError::MissingPortLabel {
            container: container.preferred_name().to_string(),
            network_mode: mode.to_string(),
        })
    })
}

fn bridge_port(container: &Container) -> Result<u16, ResolveError> {
    if let Some(port) = port_label(container) {
        return port;
    }

    let ports: Vec<u16> = container.private_ports().into_iter().collect();
    match ports.as_slice() {
        [port] => Ok(*port),
        [] => Err(ResolveError::NoExposedPorts {
            container: container.preferred_name().to_string(),
        }),
        _ => Err(ResolveError::AmbiguousPorts {
            container: container.preferred_name().to_string(),
            ports: ports.clone(),
        }),
    }
}

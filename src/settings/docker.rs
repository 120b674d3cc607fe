use serde::Deserialize;
use super::{SettingsError, parse_env_var};
pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct DockerSettings {
    /// Docker 데몬 유닉스 소켓 경로
    #[serde(default = "default_socket")]
    pub socket: String,

    /// host 네트워크 모드 컨테이너에 접근할 때 쓰는 호스트 별칭
    #[serde(default = "default_host_alias")]
    pub host_alias: String,

    /// 이벤트 스트림 재연결 간격 (초)
    #[serde(default = "default_event_retry_interval")]
    pub event_retry_interval_secs: u64,

    /// 재연결 직후 전체 동기화 실행 여부
    #[serde(default = "default_resync_on_reconnect")]
    pub resync_on_reconnect: bool,
}

impl DockerSettings {
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            socket: parse_env_var("DDASH_DOCKER_SOCKET", default_socket)?,
            host_alias: parse_env_var("DDASH_DOCKER_HOST_ALIAS", default_host_alias)?,
            event_retry_interval_secs: parse_env_var("DDASH_EVENT_RETRY_INTERVAL", default_event_retry_interval)?,
            resync_on_reconnect: parse_env_var("DDASH_RESYNC_ON_RECONNECT", default_resync_on_reconnect)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.socket.trim().is_empty() {
            return Err(SettingsError::invalid("docker.socket", &self.socket, "소켓 경로는 비어있을 수 없습니다"));
        }

        if self.host_alias.trim().is_empty() || self.host_alias.contains(':') {
            return Err(SettingsError::invalid(
                "docker.host_alias",
                &self.host_alias,
                "호스트 별칭은 비어있거나 포트를 포함할 수 없습니다",
            ));
        }

        if self.event_retry_interval_secs == 0 {
            return Err(SettingsError::invalid(
                "docker.event_retry_interval_secs",
                self.event_retry_interval_secs,
                "재연결 간격은 1초 이상이어야 합니다",
            ));
        }

        Ok(())
    }
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            socket: default_socket(),
            host_alias: default_host_alias(),
            event_retry_interval_secs: default_event_retry_interval(),
            resync_on_reconnect: default_resync_on_reconnect(),
        }
    }
}

fn default_socket() -> String {
    "/var/run/docker.sock".to_string()
}

fn default_host_alias() -> String {
    "host.docker.internal".to_string()
}

fn default_event_retry_interval() -> u64 {
    5
}

fn default_resync_on_reconnect() -> bool {
    true
}

use serde::Deserialize;
use url::Url;
use super::{SettingsError, parse_env_var};
pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct CaddySettings {
    /// Caddy 관리 API 주소
    #[serde(default = "default_admin_url")]
    pub admin_url: String,

    /// 라우트를 추가할 HTTP 서버 이름
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// 라우트 변경 후 설정 자동 저장 여부
    #[serde(default)]
    pub auto_save_config: bool,

    /// 대시보드 링크를 https로 노출할지 여부
    #[serde(default)]
    pub secure_routing: bool,

    /// 저장된 설정 파일 경로
    #[serde(default = "default_config_save_path")]
    pub config_save_path: String,

    /// 관리 API 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl CaddySettings {
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            admin_url: parse_env_var("DDASH_CADDY_ADMIN_URL", default_admin_url)?,
            server_name: parse_env_var("DDASH_CADDY_SERVER", default_server_name)?,
            auto_save_config: parse_env_var("DDASH_CADDY_AUTO_SAVE", || false)?,
            secure_routing: parse_env_var("DDASH_CADDY_SECURE_ROUTING", || false)?,
            config_save_path: parse_env_var("DDASH_CADDY_CONFIG_SAVE_PATH", default_config_save_path)?,
            request_timeout_secs: parse_env_var("DDASH_CADDY_TIMEOUT", default_request_timeout)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.admin_url)
            .map_err(|e| SettingsError::invalid("caddy.admin_url", &self.admin_url, e.to_string()))?;

        if url.scheme() != "http" || url.host_str().is_none() {
            return Err(SettingsError::invalid(
                "caddy.admin_url",
                &self.admin_url,
                "호스트가 있는 http 주소만 지원합니다",
            ));
        }

        if self.server_name.trim().is_empty() || self.server_name.contains('/') {
            return Err(SettingsError::invalid(
                "caddy.server_name",
                &self.server_name,
                "서버 이름은 비어있거나 '/'를 포함할 수 없습니다",
            ));
        }

        if self.config_save_path.trim().is_empty() {
            return Err(SettingsError::invalid(
                "caddy.config_save_path",
                &self.config_save_path,
                "저장 경로는 비어있을 수 없습니다",
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(SettingsError::invalid(
                "caddy.request_timeout_secs",
                self.request_timeout_secs,
                "타임아웃은 1초 이상이어야 합니다",
            ));
        }

        Ok(())
    }

    /// 끝의 '/'를 제거한 관리 API 기본 주소
    pub fn admin_base(&self) -> &str {
        self.admin_url.trim_end_matches('/')
    }
}

impl Default for CaddySettings {
    fn default() -> Self {
        Self {
            admin_url: default_admin_url(),
            server_name: default_server_name(),
            auto_save_config: false,
            secure_routing: false,
            config_save_path: default_config_save_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_admin_url() -> String {
    "http://localhost:2019".to_string()
}

fn default_server_name() -> String {
    "srv0".to_string()
}

fn default_config_save_path() -> String {
    "caddy-autosave.json".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

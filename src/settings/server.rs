use serde::Deserialize;
use std::env;
use super::SettingsError;

/// 대시보드 프로세스의 리슨 주소.
///
/// 라우팅 엔진은 자기 자신(대시보드 컨테이너)으로 가는 업스트림을 만들 때 이 포트를 사용합니다.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// 바인드 호스트 (기본값: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP 포트 (기본값: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            host: parse_env_var("DDASH_HOST", default_host)?,
            port: parse_env_var("DDASH_PORT", default_port)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.port == 0 {
            return Err(SettingsError::invalid("server.port", self.port, "포트는 0이 될 수 없습니다"));
        }
        if self.host.trim().is_empty() {
            return Err(SettingsError::invalid("server.host", &self.host, "호스트는 비어있을 수 없습니다"));
        }
        Ok(())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

use std::{env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;

mod server;
pub mod logging;
mod error;
pub mod docker;
pub mod caddy;

pub use server::ServerSettings;
pub use logging::LogSettings;
pub use docker::DockerSettings;
pub use caddy::CaddySettings;
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

/// 프로세스 시작 시 한 번 만들어 각 컴포넌트 생성자에 전달되는 설정.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 대시보드 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    #[serde(default)]
    pub docker: DockerSettings,

    #[serde(default)]
    pub caddy: CaddySettings,
}

impl Settings {
    /// `DDASH_CONFIG_FILE`이 있으면 TOML 파일에서, 없으면 환경 변수에서 로드합니다.
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("DDASH_CONFIG_FILE") {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        debug!(path = %path.as_ref().display(), "TOML 설정 로드 완료");
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            docker: DockerSettings::from_env()?,
            caddy: CaddySettings::from_env()?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.docker.validate()?;
        self.caddy.validate()?;
        Ok(())
    }
}

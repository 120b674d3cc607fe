use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::objects::{CaddyHttpApp, CaddyRoute};
use super::CaddyError;
use crate::settings::CaddySettings;

/// 리버스 프록시 관리 API 인터페이스
#[async_trait]
pub trait CaddyApi: Send + Sync {
    /// 관리 API 응답 여부. 실패는 `false`로 돌려줍니다.
    async fn check_connectivity(&self) -> bool;

    /// 현재 설정된 host 매처 목록. 매번 새로 조회합니다.
    async fn get_routes(&self) -> Result<Vec<String>, CaddyError>;

    async fn add_route(&self, host: &str, upstream: &str) -> Result<(), CaddyError>;

    /// 현재 설정 전체를 파일로 저장합니다.
    async fn save_config(&self) -> Result<(), CaddyError>;
}

/// HTTP로 Caddy 관리 API를 호출하는 클라이언트
pub struct HttpCaddyApi {
    client: Client<HttpConnector, Full<Bytes>>,
    settings: CaddySettings,
}

impl HttpCaddyApi {
    pub fn new(settings: CaddySettings) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .build::<_, Full<Bytes>>(HttpConnector::new());
        Self { client, settings }
    }

    fn routes_path(&self) -> String {
        format!("/config/apps/http/servers/{}/routes", self.settings.server_name)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Bytes, CaddyError> {
        let url = format!("{}{}", self.settings.admin_base(), path);
        let mut builder = Request::builder().method(method.clone()).uri(&url);
        let body = match body {
            Some(bytes) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Full::new(Bytes::from(bytes))
            }
            None => Full::new(Bytes::new()),
        };
        let request = builder.body(body).map_err(|e| CaddyError::RequestBuild {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        debug!(method = %method, url = %url, "Caddy 관리 API 요청");

        let exchange = async {
            let response = self.client.request(request).await.map_err(|e| CaddyError::Transport {
                path: path.to_string(),
                source: e,
            })?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes())
                .map_err(|e| CaddyError::Body {
                    path: path.to_string(),
                    source: e,
                })?;

            if !status.is_success() {
                return Err(CaddyError::Status {
                    path: path.to_string(),
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).trim().to_string(),
                });
            }
            Ok::<Bytes, CaddyError>(bytes)
        };

        let limit = self.settings.request_timeout_secs;
        timeout(Duration::from_secs(limit), exchange)
            .await
            .map_err(|_| CaddyError::Timeout {
                path: path.to_string(),
                timeout_secs: limit,
            })?
    }

    async fn write_atomically(path: &str, contents: &[u8]) -> Result<(), CaddyError> {
        let io_error = |source: std::io::Error| CaddyError::Io {
            path: path.to_string(),
            source,
        };

        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let tmp_path = format!("{}.tmp", path);
        tokio::fs::write(&tmp_path, contents).await.map_err(io_error)?;
        tokio::fs::rename(&tmp_path, path).await.map_err(io_error)?;
        Ok(())
    }
}

#[async_trait]
impl CaddyApi for HttpCaddyApi {
    async fn check_connectivity(&self) -> bool {
        match self.send(Method::GET, "/config/", None).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, admin_url = %self.settings.admin_url, "Caddy 연결 확인 실패");
                false
            }
        }
    }

    async fn get_routes(&self) -> Result<Vec<String>, CaddyError> {
        let path = "/config/apps/http";
        let bytes = self.send(Method::GET, path, None).await?;
        let app: Option<CaddyHttpApp> = serde_json::from_slice(&bytes).map_err(|e| CaddyError::Json {
            path: path.to_string(),
            source: e,
        })?;

        let hosts = app.map(|app| app.hosts()).unwrap_or_default();
        debug!(count = hosts.len(), routes = ?hosts, "Caddy 라우트 조회");
        Ok(hosts)
    }

    async fn add_route(&self, host: &str, upstream: &str) -> Result<(), CaddyError> {
        let path = self.routes_path();
        let body = serde_json::to_vec(&CaddyRoute::reverse_proxy(host, upstream)).map_err(|e| CaddyError::Json {
            path: path.clone(),
            source: e,
        })?;

        self.send(Method::POST, &path, Some(body)).await?;
        info!(host = %host, upstream = %upstream, "Caddy 라우트 추가");
        Ok(())
    }

    async fn save_config(&self) -> Result<(), CaddyError> {
        let path = "/config/";
        let bytes = self.send(Method::GET, path, None).await?;
        let config: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| CaddyError::Json {
            path: path.to_string(),
            source: e,
        })?;
        let pretty = serde_json::to_vec_pretty(&config).map_err(|e| CaddyError::Json {
            path: path.to_string(),
            source: e,
        })?;

        Self::write_atomically(&self.settings.config_save_path, &pretty).await?;
        info!(path = %self.settings.config_save_path, "Caddy 설정 저장 완료");
        Ok(())
    }
}

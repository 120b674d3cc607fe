use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `/config/apps/http` 문서
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaddyHttpApp {
    #[serde(default)]
    pub servers: BTreeMap<String, CaddyServer>,
}

impl CaddyHttpApp {
    /// 모든 서버의 모든 라우트에서 host 매처 값을 모읍니다.
    pub fn hosts(&self) -> Vec<String> {
        self.servers
            .values()
            .flat_map(|server| server.routes.iter())
            .flat_map(|route| route.hosts())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaddyServer {
    #[serde(default)]
    pub listen: Vec<String>,
    #[serde(default)]
    pub routes: Vec<CaddyRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaddyRoute {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matchers: Option<Vec<CaddyMatcher>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<bool>,
    #[serde(default)]
    pub handle: Vec<CaddyHandler>,
}

impl CaddyRoute {
    /// host 하나를 업스트림 하나로 넘기는 종단 라우트
    pub fn reverse_proxy(host: &str, upstream: &str) -> Self {
        Self {
            matchers: Some(vec![CaddyMatcher {
                host: vec![host.to_string()],
            }]),
            terminal: Some(true),
            handle: vec![CaddyHandler::ReverseProxy {
                upstreams: vec![CaddyUpstream {
                    dial: upstream.to_string(),
                }],
            }],
        }
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.matchers
            .iter()
            .flatten()
            .flat_map(|matcher| matcher.host.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaddyMatcher {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub enum CaddyHandler {
    ReverseProxy {
        #[serde(default)]
        upstreams: Vec<CaddyUpstream>,
    },
    FileServer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root: Option<String>,
    },
    Encode {
        #[serde(default)]
        encodings: Value,
        #[serde(default)]
        prefer: Vec<String>,
    },
    Headers {
        #[serde(default)]
        response: Value,
    },
    StaticResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
    Vars {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root: Option<String>,
    },
    Subroute {
        #[serde(default)]
        routes: Vec<CaddyRoute>,
    },
    /// 모델링하지 않은 핸들러
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaddyUpstream {
    pub dial: String,
}

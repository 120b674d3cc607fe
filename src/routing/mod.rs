//! 라벨과 네트워크 구성으로부터 원하는 라우트를 계산합니다.

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{is_self, RouteResolver};

use std::fmt;

/// 라우트가 트래픽을 넘길 백엔드 주소 (`host:port`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub host: String,
    pub port: u16,
}

impl Upstream {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// 공개 호스트 이름과 업스트림의 바인딩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub host: String,
    pub upstream: Upstream,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.host, self.upstream)
    }
}

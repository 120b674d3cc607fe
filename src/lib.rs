//! ddash는 Docker 컨테이너 라벨을 보고 Caddy 라우트를 맞춰주는 재동기화 엔진입니다.
//!
//! # 주요 기능
//!
//! - `ddash.enable` / `ddash.route` 라벨 기반 라우트 계산
//! - 네트워크 모드(bridge, host, `container:`)별 업스트림 결정
//! - Caddy 관리 API에 없는 라우트만 추가 (삭제하지 않음)
//! - Docker 이벤트 구독과 자동 재연결
//!
//! # 예제
//!
//! ```
//! use ddash::docker::{Container, ExposedPort};
//! use ddash::routing::RouteResolver;
//! use std::collections::HashMap;
//!
//! let container = Container {
//!     id: "abc123".to_string(),
//!     names: vec!["/web1".to_string()],
//!     image: "nginx:latest".to_string(),
//!     ports: vec![ExposedPort::tcp(80)],
//!     labels: HashMap::from([
//!         ("ddash.enable".to_string(), "true".to_string()),
//!         ("ddash.route".to_string(), "app.local".to_string()),
//!     ]),
//!     ..Default::default()
//! };
//!
//! let resolver = RouteResolver::with_parts(8080, "host.docker.internal");
//! let upstream = resolver.resolve(&container, &[container.clone()]).unwrap();
//! assert_eq!(upstream.to_string(), "web1:80");
//! ```

pub mod apps;
pub mod caddy;
pub mod docker;
pub mod logging;
pub mod reconcile;
pub mod routing;
pub mod settings;

//! Docker 레지스트리 클라이언트: 컨테이너 목록, 생명주기 이벤트, 로그.
//!
//! 정책은 없고 전송과 스키마 변환만 담당합니다.

mod client;
pub mod container;
mod error_types;
mod events_types;
pub mod labels;
mod logs;

pub use client::{BollardDockerClient, ContainerControl, DockerClient, EventStream, LogStream};
pub use container::{Container, ContainerState, ExposedPort, NetworkMode, Protocol};
pub use error_types::DockerError;
pub use events_types::{ContainerAction, RawEvent, ReconcileEvent};
pub use labels::DashLabel;
pub use logs::{strip_ansi_codes, LogOptions};

//! 원하는 라우트와 Caddy의 실제 라우트를 맞추는 재동기화 엔진.

mod reconciler;
mod retry;
mod startup;
mod subscriber;

pub use reconciler::{PassOutcome, PassSummary, Reconciler};
pub use retry::RetryPolicy;
pub use startup::{StartupCoordinator, StartupError, StartupState};
pub use subscriber::{EventSubscriber, SubscriberHandle, SubscriberState};

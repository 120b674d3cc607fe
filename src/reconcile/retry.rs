use tokio::sync::watch;
use tokio::time::{sleep, Duration};

use crate::settings::DockerSettings;

/// 이벤트 스트림 재연결 정책: 고정 간격, 횟수 제한 없음
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 재시도 간격
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn fixed(interval: Duration) -> Self {
        Self { interval }
    }

    /// 재시도 간격만큼 기다립니다. 도중에 종료 신호가 오면 `false`를 돌려줍니다.
    pub async fn wait(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            biased;
            _ = wait_for_shutdown(shutdown) => false,
            _ = sleep(self.interval) => true,
        }
    }
}

impl From<&DockerSettings> for RetryPolicy {
    fn from(settings: &DockerSettings) -> Self {
        Self::fixed(Duration::from_secs(settings.event_retry_interval_secs))
    }
}

/// 종료 신호가 올 때까지 기다립니다. 송신자가 사라져도 종료로 봅니다.
pub(crate) async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

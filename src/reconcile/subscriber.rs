use futures_util::{FutureExt, StreamExt};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::reconciler::Reconciler;
use super::retry::{wait_for_shutdown, RetryPolicy};
use crate::docker::{DockerClient, DockerError, RawEvent};
use crate::settings::DockerSettings;

/// 이벤트 구독 루프의 현재 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberState {
    Disconnected,
    Connecting,
    Streaming,
    Stopped,
}

/// Docker 컨테이너 이벤트를 받아 재동기화 패스를 트리거합니다.
///
/// 스트림이 끊기면 고정 간격으로 끝없이 재연결하고, 종료 신호에만 멈춥니다.
pub struct EventSubscriber {
    docker: Arc<dyn DockerClient>,
    reconciler: Arc<Reconciler>,
    retry: RetryPolicy,
    resync_on_reconnect: bool,
}

/// 실행 중인 구독 루프의 핸들. 핸들을 버리면 루프도 멈춥니다.
pub struct SubscriberHandle {
    shutdown_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<SubscriberState>,
    task: JoinHandle<()>,
}

impl SubscriberHandle {
    pub fn state(&self) -> SubscriberState {
        *self.state_rx.borrow()
    }

    pub fn state_receiver(&self) -> watch::Receiver<SubscriberState> {
        self.state_rx.clone()
    }

    /// 종료 신호를 보내고 루프가 끝날 때까지 기다립니다.
    /// 진행 중인 재동기화 패스는 끝까지 실행됩니다.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "이벤트 구독 태스크 비정상 종료");
        }
    }
}

impl EventSubscriber {
    pub fn new(docker: Arc<dyn DockerClient>, reconciler: Arc<Reconciler>, settings: &DockerSettings) -> Self {
        Self::with_policy(docker, reconciler, RetryPolicy::from(settings), settings.resync_on_reconnect)
    }

    pub fn with_policy(
        docker: Arc<dyn DockerClient>,
        reconciler: Arc<Reconciler>,
        retry: RetryPolicy,
        resync_on_reconnect: bool,
    ) -> Self {
        Self {
            docker,
            reconciler,
            retry,
            resync_on_reconnect,
        }
    }

    pub fn spawn(self) -> SubscriberHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(SubscriberState::Disconnected);
        let task = tokio::spawn(self.run(shutdown_rx, state_tx));

        SubscriberHandle {
            shutdown_tx,
            state_rx,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>, state: watch::Sender<SubscriberState>) {
        info!(retry_interval = ?self.retry.interval, "Docker 이벤트 모니터링 시작");
        let mut connected_before = false;

        'session: loop {
            if *shutdown.borrow() {
                break;
            }

            state.send_replace(SubscriberState::Connecting);
            let reachable = tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => None,
                reachable = self.docker.ping() => Some(reachable),
            };
            let Some(reachable) = reachable else {
                break;
            };

            if !reachable {
                warn!(retry_in = ?self.retry.interval, "Docker 데몬 응답 없음, 재연결 대기");
                state.send_replace(SubscriberState::Disconnected);
                if !self.retry.wait(&mut shutdown).await {
                    break;
                }
                continue;
            }

            // 스트림은 첫 poll에서 구독을 요청하므로 재동기화보다 먼저 한 번 poll합니다.
            let mut events = self.docker.events();
            let mut backlog: VecDeque<StreamItem> = events.next().now_or_never().into_iter().collect();
            state.send_replace(SubscriberState::Streaming);
            info!("Docker 이벤트 스트림 연결됨");

            if connected_before && self.resync_on_reconnect {
                info!("재연결 후 전체 재동기화");
                let pass = self.reconciler.reconcile();
                tokio::pin!(pass);
                // 패스가 도는 동안 들어온 이벤트는 쌓아 두었다가 이어서 처리합니다.
                loop {
                    let open = !backlog.back().is_some_and(ends_stream);
                    tokio::select! {
                        biased;
                        _ = &mut pass => break,
                        next = events.next(), if open => backlog.push_back(next),
                    }
                }
            }
            connected_before = true;

            let failure = loop {
                let next = match backlog.pop_front() {
                    Some(next) => next,
                    None => {
                        let next = tokio::select! {
                            biased;
                            _ = wait_for_shutdown(&mut shutdown) => None,
                            next = events.next() => Some(next),
                        };
                        let Some(next) = next else {
                            break 'session;
                        };
                        next
                    }
                };

                match next {
                    Some(Ok(raw)) => match raw.to_reconcile_event() {
                        Some(event) => {
                            info!(
                                container_id = %event.container_id,
                                action = %event.action,
                                "컨테이너 이벤트 수신"
                            );
                            self.reconciler.reconcile().await;
                        }
                        None => debug!(typ = %raw.typ, action = %raw.action, "관심 없는 이벤트 무시"),
                    },
                    Some(Err(e)) => break Some(e),
                    None => break None,
                }
            };

            match failure {
                Some(e) => error!(error = %e, retry_in = ?self.retry.interval, "이벤트 스트림 오류, 재연결 예정"),
                None => warn!(retry_in = ?self.retry.interval, "이벤트 스트림 종료, 재연결 예정"),
            }
            drop(events);
            state.send_replace(SubscriberState::Disconnected);

            if !self.retry.wait(&mut shutdown).await {
                break;
            }
        }

        state.send_replace(SubscriberState::Stopped);
        info!("Docker 이벤트 모니터링 종료");
    }
}

/// 스트림에서 한 번 꺼낸 결과. `None`은 스트림 종료
type StreamItem = Option<Result<RawEvent, DockerError>>;

fn ends_stream(item: &StreamItem) -> bool {
    !matches!(item, Some(Ok(_)))
}

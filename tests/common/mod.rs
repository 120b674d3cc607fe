//! 통합 테스트용 Docker/Caddy 가짜 구현과 컨테이너 헬퍼
#![allow(dead_code)]

use async_trait::async_trait;
use ddash::caddy::{CaddyApi, CaddyError};
use ddash::docker::{
    Container, ContainerControl, ContainerState, DockerClient, DockerError, EventStream, ExposedPort, LogOptions,
    LogStream, RawEvent,
};
use futures_util::future;
use futures_util::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration, Instant};

/// 이벤트 스트림 연결 하나가 끝나는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEnd {
    /// 스트림 오류 후 종료
    Error,
    /// 원격에서 정상 종료
    Close,
    /// 끝나지 않음
    Hang,
}

struct ScriptedConnection {
    events: Vec<RawEvent>,
    end: ConnectionEnd,
}

pub fn io_error(message: &str) -> bollard::errors::Error {
    bollard::errors::Error::IOError {
        err: std::io::Error::new(std::io::ErrorKind::ConnectionReset, message.to_string()),
    }
}

pub struct FakeDocker {
    containers: Mutex<Vec<Container>>,
    connections: Mutex<VecDeque<ScriptedConnection>>,
    list_fails: AtomicBool,
    reachable: AtomicBool,
    ping_hangs: AtomicBool,
    journal: Arc<Mutex<Vec<String>>>,
    pub list_calls: AtomicUsize,
    pub ping_calls: AtomicUsize,
    pub events_opened: AtomicUsize,
    pub commands: Mutex<Vec<(String, String)>>,
    pub log_lines: Mutex<Vec<String>>,
}

impl FakeDocker {
    pub fn new(containers: Vec<Container>) -> Self {
        Self {
            containers: Mutex::new(containers),
            connections: Mutex::new(VecDeque::new()),
            list_fails: AtomicBool::new(false),
            reachable: AtomicBool::new(true),
            ping_hangs: AtomicBool::new(false),
            journal: Arc::new(Mutex::new(Vec::new())),
            list_calls: AtomicUsize::new(0),
            ping_calls: AtomicUsize::new(0),
            events_opened: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
            log_lines: Mutex::new(Vec::new()),
        }
    }

    pub fn set_containers(&self, containers: Vec<Container>) {
        *self.containers.lock().unwrap() = containers;
    }

    pub fn set_list_fails(&self, fails: bool) {
        self.list_fails.store(fails, Ordering::SeqCst);
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// `ping()`이 응답하지 않고 멈춰 있게 합니다.
    pub fn set_ping_hangs(&self, hangs: bool) {
        self.ping_hangs.store(hangs, Ordering::SeqCst);
    }

    /// 다음 `events()` 호출이 돌려줄 연결을 예약합니다.
    /// 예약이 없으면 아무 이벤트 없이 끝나지 않는 스트림을 돌려줍니다.
    pub fn push_connection(&self, events: Vec<RawEvent>, end: ConnectionEnd) {
        self.connections
            .lock()
            .unwrap()
            .push_back(ScriptedConnection { events, end });
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn ping_calls(&self) -> usize {
        self.ping_calls.load(Ordering::SeqCst)
    }

    pub fn events_opened(&self) -> usize {
        self.events_opened.load(Ordering::SeqCst)
    }

    /// `list`(목록 조회)와 `subscribed#N`(N번째 스트림의 첫 poll)이 일어난 순서
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }
}

#[async_trait]
impl DockerClient for FakeDocker {
    async fn list_containers(&self) -> Result<Vec<Container>, DockerError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.lock().unwrap().push("list".to_string());
        if self.list_fails.load(Ordering::SeqCst) {
            return Err(DockerError::ListContainersError {
                source: io_error("daemon unavailable"),
                context: "fake".to_string(),
            });
        }
        Ok(self.containers.lock().unwrap().clone())
    }

    async fn ping(&self) -> bool {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        if self.ping_hangs.load(Ordering::SeqCst) {
            future::pending::<()>().await;
        }
        self.reachable.load(Ordering::SeqCst)
    }

    fn events(&self) -> EventStream {
        let seq = self.events_opened.fetch_add(1, Ordering::SeqCst);
        let Some(connection) = self.connections.lock().unwrap().pop_front() else {
            return subscribe_on_first_poll(
                self.journal.clone(),
                seq,
                Box::pin(stream::pending::<Result<RawEvent, DockerError>>()),
            );
        };

        let tail: EventStream = match connection.end {
            ConnectionEnd::Error => Box::pin(stream::once(async {
                Err::<RawEvent, DockerError>(DockerError::EventStreamError {
                    source: io_error("stream reset"),
                    context: "fake".to_string(),
                })
            })),
            ConnectionEnd::Close => Box::pin(stream::empty::<Result<RawEvent, DockerError>>()),
            ConnectionEnd::Hang => Box::pin(stream::pending::<Result<RawEvent, DockerError>>()),
        };

        subscribe_on_first_poll(
            self.journal.clone(),
            seq,
            Box::pin(stream::iter(connection.events.into_iter().map(Ok)).chain(tail)),
        )
    }
}

/// bollard처럼 첫 poll에서야 구독이 일어나는 스트림. 구독 시점을 기록합니다.
fn subscribe_on_first_poll(journal: Arc<Mutex<Vec<String>>>, seq: usize, events: EventStream) -> EventStream {
    let subscribe = stream::once(async move {
        journal.lock().unwrap().push(format!("subscribed#{}", seq));
        None::<Result<RawEvent, DockerError>>
    })
    .filter_map(future::ready);
    Box::pin(subscribe.chain(events))
}

#[async_trait]
impl ContainerControl for FakeDocker {
    fn container_logs(&self, container_id: &str, options: &LogOptions) -> LogStream {
        self.commands
            .lock()
            .unwrap()
            .push((format!("logs(timestamps={})", options.timestamps), container_id.to_string()));
        let lines: Vec<Result<String, DockerError>> = self.log_lines.lock().unwrap().iter().cloned().map(Ok).collect();
        Box::pin(stream::iter(lines))
    }

    async fn start_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.record("start", container_id)
    }

    async fn stop_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.record("stop", container_id)
    }

    async fn restart_container(&self, container_id: &str) -> Result<(), DockerError> {
        self.record("restart", container_id)
    }
}

impl FakeDocker {
    fn record(&self, command: &str, container_id: &str) -> Result<(), DockerError> {
        if container_id == "missing" {
            return Err(DockerError::ContainerCommandError {
                container_id: container_id.to_string(),
                source: io_error("no such container"),
                context: command.to_string(),
            });
        }
        self.commands
            .lock()
            .unwrap()
            .push((command.to_string(), container_id.to_string()));
        Ok(())
    }
}

pub struct FakeCaddy {
    reachable: AtomicBool,
    routes: Mutex<Vec<String>>,
    get_routes_fails: AtomicBool,
    failing_hosts: Mutex<HashSet<String>>,
    save_fails: AtomicBool,
    pub added: Mutex<Vec<(String, String)>>,
    pub save_calls: AtomicUsize,
}

impl FakeCaddy {
    pub fn new() -> Self {
        Self::with_routes(&[])
    }

    pub fn with_routes(hosts: &[&str]) -> Self {
        Self {
            reachable: AtomicBool::new(true),
            routes: Mutex::new(hosts.iter().map(|h| h.to_string()).collect()),
            get_routes_fails: AtomicBool::new(false),
            failing_hosts: Mutex::new(HashSet::new()),
            save_fails: AtomicBool::new(false),
            added: Mutex::new(Vec::new()),
            save_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn set_get_routes_fails(&self, fails: bool) {
        self.get_routes_fails.store(fails, Ordering::SeqCst);
    }

    pub fn fail_host(&self, host: &str) {
        self.failing_hosts.lock().unwrap().insert(host.to_string());
    }

    pub fn set_save_fails(&self, fails: bool) {
        self.save_fails.store(fails, Ordering::SeqCst);
    }

    pub fn added(&self) -> Vec<(String, String)> {
        self.added.lock().unwrap().clone()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    fn status_error(path: &str) -> CaddyError {
        CaddyError::Status {
            path: path.to_string(),
            status: 500,
            body: "fake failure".to_string(),
        }
    }
}

#[async_trait]
impl CaddyApi for FakeCaddy {
    async fn check_connectivity(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    async fn get_routes(&self) -> Result<Vec<String>, CaddyError> {
        if self.get_routes_fails.load(Ordering::SeqCst) {
            return Err(Self::status_error("/config/apps/http"));
        }
        Ok(self.routes.lock().unwrap().clone())
    }

    async fn add_route(&self, host: &str, upstream: &str) -> Result<(), CaddyError> {
        if self.failing_hosts.lock().unwrap().contains(host) {
            return Err(Self::status_error("/config/apps/http/servers/srv0/routes"));
        }
        self.added
            .lock()
            .unwrap()
            .push((host.to_string(), upstream.to_string()));
        self.routes.lock().unwrap().push(host.to_string());
        Ok(())
    }

    async fn save_config(&self) -> Result<(), CaddyError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.save_fails.load(Ordering::SeqCst) {
            return Err(Self::status_error("/config/"));
        }
        Ok(())
    }
}

/// 라벨과 노출 포트를 가진 테스트 컨테이너
pub fn container(id: &str, name: &str, labels: &[(&str, &str)], ports: &[u16]) -> Container {
    Container {
        id: id.to_string(),
        names: vec![format!("/{}", name)],
        image: "nginx:latest".to_string(),
        state: ContainerState::Running,
        ports: ports.iter().map(|port| ExposedPort::tcp(*port)).collect(),
        labels: labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
        network_mode: None,
    }
}

/// `ddash.enable=true`, `ddash.route=<host>` 라벨을 가진 컨테이너
pub fn routed(id: &str, name: &str, host: &str, ports: &[u16]) -> Container {
    container(id, name, &[("ddash.enable", "true"), ("ddash.route", host)], ports)
}

pub fn with_network_mode(mut container: Container, mode: &str) -> Container {
    container.network_mode = Some(mode.to_string());
    container
}

pub fn with_label(mut container: Container, key: &str, value: &str) -> Container {
    container.labels.insert(key.to_string(), value.to_string());
    container
}

pub fn container_event(action: &str, id: &str) -> RawEvent {
    RawEvent::new("container", action, id)
}

/// 조건이 참이 될 때까지 기다립니다.
pub async fn wait_until<F: Fn() -> bool>(condition: F, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    condition()
}

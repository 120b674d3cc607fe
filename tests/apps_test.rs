mod common;

use common::{container, routed, with_label, FakeDocker};
use ddash::apps::{AppData, AppService};
use ddash::docker::ContainerState;
use ddash::settings::Settings;
use futures_util::StreamExt;
use std::sync::Arc;

fn service(docker: &Arc<FakeDocker>, secure_routing: bool) -> AppService {
    let mut settings = Settings::default();
    settings.caddy.secure_routing = secure_routing;
    AppService::new(docker.clone(), docker.clone(), &settings)
}

#[tokio::test]
async fn test_apps_lists_enabled_containers() {
    let mut stopped = with_label(
        with_label(routed("b", "db-admin", "db.local", &[8080]), "ddash.name", "DB Admin"),
        "ddash.category",
        "Database",
    );
    stopped.state = ContainerState::Exited;
    let docker = Arc::new(FakeDocker::new(vec![
        routed("a", "web1", "app.local", &[80]),
        stopped,
        container("c", "hidden", &[("ddash.route", "hidden.local")], &[80]),
    ]));

    let apps = service(&docker, false).apps().await;

    assert_eq!(
        apps,
        vec![
            AppData {
                id: "a".to_string(),
                name: "web1".to_string(),
                url: "http://app.local".to_string(),
                category: "Uncategorized".to_string(),
                status: ContainerState::Running,
                icon: "LayoutGrid".to_string(),
            },
            AppData {
                id: "b".to_string(),
                name: "DB Admin".to_string(),
                url: "http://db.local".to_string(),
                category: "Database".to_string(),
                status: ContainerState::Exited,
                icon: "LayoutGrid".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_secure_routing_and_missing_route() {
    let docker = Arc::new(FakeDocker::new(vec![
        routed("a", "web1", "app.local", &[80]),
        with_label(container("b", "worker", &[("ddash.enable", "true")], &[]), "ddash.icon", "Cpu"),
    ]));

    let apps = service(&docker, true).apps().await;

    assert_eq!(apps[0].url, "https://app.local");
    assert_eq!(apps[1].url, "");
    assert_eq!(apps[1].icon, "Cpu");
}

#[tokio::test]
async fn test_apps_serialize_status_uppercase() {
    let docker = Arc::new(FakeDocker::new(vec![routed("a", "web1", "app.local", &[80])]));
    let apps = service(&docker, false).apps().await;

    let json = serde_json::to_value(&apps[0]).unwrap();
    assert_eq!(json["status"], "RUNNING");
    assert_eq!(json["category"], "Uncategorized");
}

#[tokio::test]
async fn test_list_failure_gives_empty_catalogue() {
    let docker = Arc::new(FakeDocker::new(vec![routed("a", "web1", "app.local", &[80])]));
    docker.set_list_fails(true);

    assert!(service(&docker, false).apps().await.is_empty());
}

#[tokio::test]
async fn test_container_commands_are_forwarded() {
    let docker = Arc::new(FakeDocker::new(vec![]));
    let service = service(&docker, false);

    service.start("a").await.unwrap();
    service.stop("a").await.unwrap();
    service.restart("a").await.unwrap();
    assert!(service.start("missing").await.is_err());

    let commands = docker.commands.lock().unwrap().clone();
    assert_eq!(
        commands,
        vec![
            ("start".to_string(), "a".to_string()),
            ("stop".to_string(), "a".to_string()),
            ("restart".to_string(), "a".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_logs_stream() {
    let docker = Arc::new(FakeDocker::new(vec![]));
    docker
        .log_lines
        .lock()
        .unwrap()
        .extend(["first".to_string(), "second".to_string()]);

    let lines: Vec<String> = service(&docker, false)
        .logs("a", true)
        .map(|line| line.unwrap())
        .collect()
        .await;

    assert_eq!(lines, vec!["first", "second"]);
    assert_eq!(
        docker.commands.lock().unwrap()[0],
        ("logs(timestamps=true)".to_string(), "a".to_string())
    );
}

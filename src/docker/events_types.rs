use bollard::models::{EventMessage, EventMessageTypeEnum};
use std::fmt;

/// 런타임 이벤트 피드에서 받은 원본 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub typ: String,
    pub action: String,
    pub actor_id: String,
}

impl RawEvent {
    pub fn new(typ: impl Into<String>, action: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self {
            typ: typ.into(),
            action: action.into(),
            actor_id: actor_id.into(),
        }
    }

    /// 재동기화 대상 이벤트이면 `ReconcileEvent`로 변환합니다.
    pub fn to_reconcile_event(&self) -> Option<ReconcileEvent> {
        if self.typ != "container" {
            return None;
        }
        ContainerAction::parse(&self.action).map(|action| ReconcileEvent {
            container_id: self.actor_id.clone(),
            action,
        })
    }
}

impl From<EventMessage> for RawEvent {
    fn from(message: EventMessage) -> Self {
        let typ = match message.typ {
            Some(EventMessageTypeEnum::CONTAINER) => "container".to_string(),
            Some(other) => format!("{:?}", other).to_lowercase(),
            None => String::new(),
        };
        Self {
            typ,
            action: message.action.unwrap_or_default(),
            actor_id: message.actor.and_then(|actor| actor.id).unwrap_or_default(),
        }
    }
}

/// 재동기화를 일으키는 컨테이너 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Die,
    Destroy,
    Rename,
    Update,
}

impl ContainerAction {
    pub const ALL: [ContainerAction; 6] = [
        ContainerAction::Start,
        ContainerAction::Stop,
        ContainerAction::Die,
        ContainerAction::Destroy,
        ContainerAction::Rename,
        ContainerAction::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Die => "die",
            ContainerAction::Destroy => "destroy",
            ContainerAction::Rename => "rename",
            ContainerAction::Update => "update",
        }
    }

    pub fn parse(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == action)
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 한 번의 재동기화를 일으키는 (컨테이너 id, 액션) 쌍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileEvent {
    pub container_id: String,
    pub action: ContainerAction,
}

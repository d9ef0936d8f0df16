// region:    --- Imports
use crate::request::events::RequestEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

// endregion: --- Imports

// region:    --- Event Model
/// 이벤트 저장소에 저장되는 이벤트 모델
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub aggregate_id: String,
    pub event_type: String,
    pub data: RequestEvent,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: i64,
}
// endregion: --- Event Model

// region:    --- Event Log
/// 요청별 라이프사이클 이벤트 기록 (추가 전용)
/// 버전은 요청마다 1부터 1씩 증가한다.
/// 상태를 재구성하는 용도가 아니라 감사 기록 용도다.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
    versions: HashMap<String, i64>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이벤트 추가
    pub fn append(&mut self, event: RequestEvent) -> &Event {
        let aggregate_id = event.request_id().to_string();
        let version = self.versions.entry(aggregate_id.clone()).or_insert(0);
        *version += 1;

        let stored = Event {
            id: self.events.len() as i64 + 1,
            aggregate_id,
            event_type: event.event_type().to_string(),
            timestamp: event.timestamp(),
            version: *version,
            data: event,
        };
        debug!(
            "{:<12} --> {} v{} ({})",
            "EventStore", stored.event_type, stored.version, stored.aggregate_id
        );
        self.events.push(stored);
        &self.events[self.events.len() - 1]
    }

    /// 요청 이벤트 조회 (버전 순)
    pub fn events_for(&self, aggregate_id: &str) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }
}
// endregion: --- Event Log

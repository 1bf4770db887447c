use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated over one interactive session.
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    tables: u64,
    rows: u64,
    rejected_inputs: u64,
    dropped_bytes: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_table(&mut self, rows: usize, dropped_bytes: usize) {
        self.tables = self.tables.saturating_add(1);
        self.rows = self.rows.saturating_add(rows as u64);
        self.dropped_bytes = self.dropped_bytes.saturating_add(dropped_bytes as u64);
    }

    pub fn record_rejected_input(&mut self) {
        self.rejected_inputs = self.rejected_inputs.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            tables: self.tables,
            rows: self.rows,
            rejected_inputs: self.rejected_inputs,
            dropped_bytes: self.dropped_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub tables: u64,
    pub rows: u64,
    pub rejected_inputs: u64,
    pub dropped_bytes: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("tables".to_string(), json!(self.tables));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("rejected_inputs".to_string(), json!(self.rejected_inputs));
        map.insert("dropped_bytes".to_string(), json!(self.dropped_bytes));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "session_metrics", self.as_fields())
    }
}

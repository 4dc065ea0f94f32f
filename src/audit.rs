//! Audit sink.
//!
//! One append-only record per automation call: correlation id, principal,
//! request payload, response payload. Fire-and-forget, best-effort; a sink
//! failure never affects the automation result.

use std::fs::OpenOptions;
use std::io::Write;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// One automation call's audit entry. Written once, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub correlation_id: String,
    /// Username the call authenticated as.
    pub principal: String,
    pub request: JsonValue,
    pub response: JsonValue,
    pub recorded_at: String,
}

impl AuditRecord {
    pub fn new(
        correlation_id: impl Into<String>,
        principal: impl Into<String>,
        request: JsonValue,
        response: JsonValue,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            principal: principal.into(),
            request,
            response,
            recorded_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Best-effort write; implementations log failures and swallow them.
    fn record(&self, record: AuditRecord);
}

/// Appends one JSON line per record to a local file.
pub struct FileAuditSink {
    path: String,
}

impl FileAuditSink {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, record: &AuditRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, record: AuditRecord) {
        debug!(
            "audit: {} by {} -> {}",
            record.correlation_id, record.principal, self.path
        );
        if let Err(e) = self.append(&record) {
            warn!("⚠️ audit write to {} failed: {}", self.path, e);
        }
    }
}

/// Discards every record. Used by tests and library callers that persist
/// audit data elsewhere.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _record: AuditRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_sink_appends_one_line_per_record() {
        let path = std::env::temp_dir().join(format!("audit_test_{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let sink = FileAuditSink::new(path.to_string_lossy().to_string());

        sink.record(AuditRecord::new(
            "req-1",
            "coach",
            json!({"username": "coach"}),
            json!(["Boys Swimming"]),
        ));
        sink.record(AuditRecord::new(
            "req-1",
            "coach",
            json!({"sport": "Boys Swimming"}),
            json!({"success": false}),
        ));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: JsonValue = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["correlationId"], "req-1");
        assert_eq!(first["principal"], "coach");
        let _ = std::fs::remove_file(&path);
    }
}

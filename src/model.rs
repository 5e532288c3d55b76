//! Wire types exchanged with the remote products, plus the request value
//! passed into each log data fetch.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{LiveLogsError, Result};

/// Live log configuration reported by a remote product
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    #[serde(rename = "logs", default)]
    pub log_file_names: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub refresh_rate_millis: u64,
}

impl LogConfig {
    /// Reject configs that list no nodes or no log files
    pub fn ensure_complete(self) -> Result<Self> {
        if self.log_file_names.is_empty() {
            return Err(LiveLogsError::EmptyResult(
                "no log file names were found".to_string(),
            ));
        }
        if self.nodes.is_empty() {
            return Err(LiveLogsError::EmptyResult(
                "no node names were found".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_millis)
    }

    pub fn display(&self) -> ConfigDisplay {
        ConfigDisplay {
            logs: self.log_file_names.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

/// One page of log content
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LogChunk {
    #[serde(rename = "log_content", default)]
    pub content: String,
    /// Opaque cursor to hand back on the next fetch
    #[serde(rename = "file_size", default)]
    pub page_marker: i64,
}

/// What the config command prints
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigDisplay {
    pub logs: Vec<String>,
    pub nodes: Vec<String>,
}

/// Which log to read, on which node, and from where
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRequest {
    pub node_id: String,
    pub log_file_name: String,
    pub page_marker: i64,
}

impl LogRequest {
    /// A request starting from the beginning of the log
    pub fn new(node_id: impl Into<String>, log_file_name: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            log_file_name: log_file_name.into(),
            page_marker: 0,
        }
    }

    /// The same request continuing from `page_marker`
    pub fn advance(&self, page_marker: i64) -> Self {
        Self {
            page_marker,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_id.is_empty() {
            return Err(LiveLogsError::PreconditionFailed("node id"));
        }
        if self.log_file_name.is_empty() {
            return Err(LiveLogsError::PreconditionFailed("log file name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_wire_names() {
        let config: LogConfig = serde_json::from_str(
            r#"{"logs":["console.log"],"nodes":["node1"],"refresh_rate_millis":2500}"#,
        )
        .unwrap();
        assert_eq!(config.log_file_names, vec!["console.log"]);
        assert_eq!(config.nodes, vec!["node1"]);
        assert_eq!(config.refresh_rate(), Duration::from_millis(2500));
    }

    #[test]
    fn test_config_missing_fields_are_empty() {
        let config: LogConfig = serde_json::from_str(r#"{"nodes":["node1"]}"#).unwrap();
        assert!(config.log_file_names.is_empty());
        assert_eq!(config.refresh_rate_millis, 0);
        assert!(matches!(
            config.ensure_complete(),
            Err(LiveLogsError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_config_without_nodes_is_rejected() {
        let config = LogConfig {
            log_file_names: vec!["a.log".to_string()],
            nodes: vec![],
            refresh_rate_millis: 0,
        };
        let err = config.ensure_complete().unwrap_err();
        assert_eq!(err.to_string(), "no node names were found");
    }

    #[test]
    fn test_chunk_parses_wire_names() {
        let chunk: LogChunk =
            serde_json::from_str(r#"{"log_content":"line\n","file_size":42}"#).unwrap();
        assert_eq!(chunk.content, "line\n");
        assert_eq!(chunk.page_marker, 42);

        let empty: LogChunk = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LogChunk::default());
    }

    #[test]
    fn test_display_serializes_logs_then_nodes() {
        let config = LogConfig {
            log_file_names: vec!["log1".to_string(), "log2".to_string()],
            nodes: vec!["node1".to_string(), "node2".to_string()],
            refresh_rate_millis: 10_000,
        };
        let json = serde_json::to_string(&config.display()).unwrap();
        assert_eq!(json, r#"{"logs":["log1","log2"],"nodes":["node1","node2"]}"#);
    }

    #[test]
    fn test_request_validation() {
        assert!(matches!(
            LogRequest::new("", "a.log").validate(),
            Err(LiveLogsError::PreconditionFailed("node id"))
        ));
        assert!(matches!(
            LogRequest::new("node1", "").validate(),
            Err(LiveLogsError::PreconditionFailed("log file name"))
        ));
        assert!(LogRequest::new("node1", "a.log").validate().is_ok());
    }

    #[test]
    fn test_request_advance_keeps_target() {
        let first = LogRequest::new("node1", "a.log");
        assert_eq!(first.page_marker, 0);
        let next = first.advance(1024);
        assert_eq!(next.page_marker, 1024);
        assert_eq!(next.node_id, "node1");
        assert_eq!(next.log_file_name, "a.log");
    }
}

//! Remote product access.
//!
//! Provides a unified `LogService` trait with one generic implementation,
//! `ProductAdapter`, wired per product by a descriptor table:
//! - Artifactory (platform session auth, version >= 7.16.0)
//! - Xray (bearer token, version >= 3.18.0)
//! - Mission Control (bearer token, no version gate)
//! - Pipelines (bearer token, version >= 1.13.0)
//! - Distribution (bearer token, version >= 2.7.0)

pub mod adapter;
pub mod product;
pub mod transport;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{LogChunk, LogConfig, LogRequest};
use product::Product;

/// Trait for remote log services
#[async_trait]
pub trait LogService: Send + Sync {
    /// Fetch the node list, log file list and refresh interval
    async fn get_config(&self, server_id: &str) -> Result<LogConfig>;

    /// Fetch the next chunk of the requested log
    async fn get_log_data(&self, server_id: &str, request: &LogRequest) -> Result<LogChunk>;

    /// The product this service talks to
    #[allow(dead_code)]
    fn product(&self) -> Product;
}

//! Top-level façade used by the command layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::cancel::CancelSignal;
use crate::config::{DEFAULT_REFRESH_RATE, Settings};
use crate::credentials::CredentialResolver;
use crate::error::{LiveLogsError, Result};
use crate::model::{LogConfig, LogRequest};
use crate::service::LogService;
use crate::service::adapter::ProductAdapter;
use crate::service::product::Product;
use crate::service::transport::Transport;
use crate::tail::TailController;
use crate::validate::validate_argument;

/// State for one command invocation
pub struct Session {
    settings: Settings,
    credentials: Arc<dyn CredentialResolver>,
    transport: Arc<dyn Transport>,
    cancel: CancelSignal,
    product: Option<Product>,
    server_id: String,
    refresh_rate: Duration,
    page_marker: i64,
    service: Option<Arc<dyn LogService>>,
}

impl Session {
    pub fn new(
        settings: Settings,
        credentials: Arc<dyn CredentialResolver>,
        transport: Arc<dyn Transport>,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            settings,
            credentials,
            transport,
            cancel,
            product: None,
            server_id: String::new(),
            refresh_rate: DEFAULT_REFRESH_RATE,
            page_marker: 0,
            service: None,
        }
    }

    /// Select the product; a different product drops the cached adapter
    pub fn set_product(&mut self, product: Product) {
        if self.product != Some(product) {
            self.service = None;
        }
        self.product = Some(product);
    }

    #[allow(dead_code)]
    pub fn product(&self) -> Option<Product> {
        self.product
    }

    pub fn set_server_id(&mut self, server_id: impl Into<String>) {
        self.server_id = server_id.into();
    }

    #[allow(dead_code)]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// A zero rate falls back to the default so tail never spins
    pub fn set_refresh_rate(&mut self, refresh_rate: Duration) {
        self.refresh_rate = if refresh_rate.is_zero() {
            DEFAULT_REFRESH_RATE
        } else {
            refresh_rate
        };
    }

    #[allow(dead_code)]
    pub fn refresh_rate(&self) -> Duration {
        self.refresh_rate
    }

    /// Page marker reached by the last cat or tail
    #[allow(dead_code)]
    pub fn page_marker(&self) -> i64 {
        self.page_marker
    }

    /// The adapter for the selected product, built on first use
    fn service(&mut self) -> Result<Arc<dyn LogService>> {
        if let Some(service) = &self.service {
            return Ok(service.clone());
        }

        let product = self.product.ok_or_else(|| {
            LiveLogsError::InvalidArgument("product id must be set".to_string())
        })?;
        let service: Arc<dyn LogService> = Arc::new(ProductAdapter::new(
            product,
            &self.settings,
            self.credentials.clone(),
            self.transport.clone(),
        ));
        self.service = Some(service.clone());
        Ok(service)
    }

    /// Validate and select product and server ids
    fn select(&mut self, product_id: &str, server_id: &str) -> Result<()> {
        validate_argument("product id", product_id, &Product::all_ids())?;
        validate_argument("server id", server_id, &self.credentials.server_ids())?;

        if let Some(product) = Product::from_id(product_id) {
            self.set_product(product);
        }
        self.set_server_id(server_id);
        Ok(())
    }

    /// Fetch the live log configuration of the selected product
    pub async fn config_data(&mut self) -> Result<LogConfig> {
        let service = self.service()?;
        service.get_config(&self.server_id).await
    }

    /// Print the selected product's nodes and log names as JSON
    pub async fn display_config<W>(&mut self, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let config = self.config_data().await?;
        let mut json = serde_json::to_string_pretty(&config.display())?;
        json.push('\n');
        out.write_all(json.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    /// `config <product-id> <server-id>`
    pub async fn config_non_interactive<W>(
        &mut self,
        product_id: &str,
        server_id: &str,
        out: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.select(product_id, server_id)?;
        self.display_config(out).await
    }

    /// Cat or tail `log_name` on `node_id` with the current product and server
    pub async fn print_logs<W>(
        &mut self,
        node_id: &str,
        log_name: &str,
        streaming: bool,
        out: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let service = self.service()?;
        let controller = TailController::new(self.refresh_rate, self.cancel.clone());

        self.page_marker = 0;
        let request = LogRequest::new(node_id, log_name);
        self.page_marker = controller
            .run(service.as_ref(), &self.server_id, request, streaming, out)
            .await?;
        Ok(())
    }

    /// `logs <product-id> <server-id> <node-id> <log-name> [-f]`
    pub async fn log_non_interactive<W>(
        &mut self,
        product_id: &str,
        server_id: &str,
        node_id: &str,
        log_name: &str,
        streaming: bool,
        out: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.select(product_id, server_id)?;

        let config = self.config_data().await?;
        validate_argument("log name", log_name, &config.log_file_names)?;
        validate_argument("node id", node_id, &config.nodes)?;

        self.set_refresh_rate(config.refresh_rate());
        debug!(refresh_rate = ?self.refresh_rate, streaming, "printing logs");

        self.print_logs(node_id, log_name, streaming, out).await
    }
}

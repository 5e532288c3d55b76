//! Drives log fetches against a `LogService`: a single fetch (cat) or a
//! polling loop (tail) that runs until cancelled.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::cancel::CancelSignal;
use crate::error::Result;
use crate::model::LogRequest;
use crate::service::LogService;

/// Fetch-and-print controller
pub struct TailController {
    refresh_rate: Duration,
    cancel: CancelSignal,
}

impl TailController {
    pub fn new(refresh_rate: Duration, cancel: CancelSignal) -> Self {
        Self {
            refresh_rate,
            cancel,
        }
    }

    /// Cat or tail depending on `streaming`; returns the last page marker
    pub async fn run<W>(
        &self,
        service: &dyn LogService,
        server_id: &str,
        request: LogRequest,
        streaming: bool,
        out: &mut W,
    ) -> Result<i64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        if streaming {
            self.tail(service, server_id, request, out).await
        } else {
            self.cat(service, server_id, request, out).await
        }
    }

    /// Fetch the log once from the start and write it out
    pub async fn cat<W>(
        &self,
        service: &dyn LogService,
        server_id: &str,
        request: LogRequest,
        out: &mut W,
    ) -> Result<i64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let request = request.advance(0);
        request.validate()?;

        let chunk = service.get_log_data(server_id, &request).await?;
        write_content(out, &chunk.content).await?;
        Ok(chunk.page_marker)
    }

    /// Poll the log every refresh interval until cancelled
    ///
    /// The first fetch fires immediately. Each fetch continues from the page
    /// marker of the previous one. Any fetch error ends the loop.
    pub async fn tail<W>(
        &self,
        service: &dyn LogService,
        server_id: &str,
        request: LogRequest,
        out: &mut W,
    ) -> Result<i64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut request = request.advance(0);
        request.validate()?;

        let mut wait = Duration::ZERO;
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
            wait = self.refresh_rate;

            let chunk = service.get_log_data(server_id, &request).await?;
            if self.cancel.is_cancelled() {
                debug!("cancelled while fetching, dropping last chunk");
                break;
            }

            request = request.advance(chunk.page_marker);
            write_content(out, &chunk.content).await?;
        }

        Ok(request.page_marker)
    }
}

async fn write_content<W>(out: &mut W, content: &str) -> Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    out.write_all(content.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

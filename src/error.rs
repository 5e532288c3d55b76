//! Error taxonomy shared by the transport, adapters, tail controller and session.

use thiserror::Error;

/// Errors surfaced by the live-logs core
#[derive(Debug, Error)]
pub enum LiveLogsError {
    /// A required request field was not set before a data fetch
    #[error("{0} must be set")]
    PreconditionFailed(&'static str),

    /// Unknown product, server, node or log name
    #[error("{0}")]
    InvalidArgument(String),

    /// No URL or token could be resolved for a server and product
    #[error("no {what} found in the server id '{server_id}'; it is mandatory for connecting to {product}")]
    MissingCredential {
        server_id: String,
        product: &'static str,
        what: &'static str,
    },

    /// The remote product is older than the minimum supported version
    #[error("found {product} version as {current}; the minimum supported version is {minimum}")]
    UnsupportedVersion {
        product: &'static str,
        current: String,
        minimum: &'static str,
    },

    /// Non-2xx HTTP response
    #[error("{}", remote_message(*status, body, *unexpected))]
    Remote {
        status: u16,
        body: String,
        unexpected: bool,
    },

    /// Network-level failure (DNS, TLS, timeout)
    #[error("request failed: {0}")]
    Transport(String),

    /// The remote answered without the data we need
    #[error("{0}")]
    EmptyResult(String),

    /// The remote answered with malformed JSON
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing log content to the output sink failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LiveLogsError>;

fn remote_message(status: u16, body: &str, unexpected: bool) -> String {
    if unexpected {
        format!("unexpected response; status code: {}, message: {}", status, body)
    } else {
        format!("status code: {}; message: {}", status, body)
    }
}

/// Map an HTTP status to success or a `Remote` error carrying the body.
pub fn check_status(status: u16, body: &[u8]) -> Result<()> {
    match status {
        200 => Ok(()),
        400 | 404 | 429 => Err(LiveLogsError::Remote {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            unexpected: false,
        }),
        200..=299 => Ok(()),
        _ => Err(LiveLogsError::Remote {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            unexpected: true,
        }),
    }
}

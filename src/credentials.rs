//! Server profiles and the lookup that turns a server id into connection
//! details for a product.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use serde::Deserialize;

use crate::error::Result;
use crate::service::product::Product;
use crate::validate::unknown_argument;

/// Connection details resolved for one server and product
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerCredentials {
    pub base_url: String,
    pub access_token: String,
    pub user: String,
    pub password: String,
}

/// Resolves server ids to connection details
pub trait CredentialResolver: Send + Sync {
    /// Connection details for `product` on `server_id`; unknown ids are an error
    fn connection_details(&self, server_id: &str, product: Product) -> Result<ServerCredentials>;

    /// All configured server ids
    fn server_ids(&self) -> Vec<String>;
}

/// A `[[servers]]` entry in the servers file
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerProfile {
    pub id: String,
    /// Platform URL the product URLs are derived from
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub artifactory_url: Option<String>,
    #[serde(default)]
    pub xray_url: Option<String>,
    #[serde(default)]
    pub mission_control_url: Option<String>,
    #[serde(default)]
    pub pipelines_url: Option<String>,
    #[serde(default)]
    pub distribution_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ServerProfile {
    /// The explicit product URL, or one derived from the platform URL
    pub fn product_url(&self, product: Product) -> String {
        let explicit = match product {
            Product::Artifactory => &self.artifactory_url,
            Product::Xray => &self.xray_url,
            Product::MissionControl => &self.mission_control_url,
            Product::Pipelines => &self.pipelines_url,
            Product::Distribution => &self.distribution_url,
        };

        if let Some(url) = explicit.as_deref().filter(|u| !u.is_empty()) {
            return with_trailing_slash(url);
        }

        match self.url.as_deref().filter(|u| !u.is_empty()) {
            Some(platform) => format!("{}{}/", with_trailing_slash(platform), product_path(product)),
            None => String::new(),
        }
    }
}

fn product_path(product: Product) -> &'static str {
    match product {
        Product::Artifactory => "artifactory",
        Product::Xray => "xray",
        Product::MissionControl => "mc",
        Product::Pipelines => "pipelines",
        Product::Distribution => "distribution",
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServersFile {
    #[serde(default)]
    servers: Vec<ServerProfile>,
}

/// Server profiles loaded from a TOML file
#[derive(Clone, Debug, Default)]
pub struct ServerRegistry {
    servers: Vec<ServerProfile>,
}

impl ServerRegistry {
    pub fn new(servers: Vec<ServerProfile>) -> Self {
        Self { servers }
    }

    /// Load profiles from `path`; a missing file yields an empty registry
    pub fn load(path: &Path) -> AnyResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "servers file not found");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read servers file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse servers file {}", path.display()))
    }

    pub fn parse(contents: &str) -> AnyResult<Self> {
        let file: ServersFile = toml::from_str(contents)?;
        Ok(Self::new(file.servers))
    }

    fn profile(&self, server_id: &str) -> Result<&ServerProfile> {
        self.servers
            .iter()
            .find(|s| s.id == server_id)
            .ok_or_else(|| unknown_argument("server id", server_id, &self.server_ids()))
    }
}

impl CredentialResolver for ServerRegistry {
    fn connection_details(&self, server_id: &str, product: Product) -> Result<ServerCredentials> {
        let profile = self.profile(server_id)?;
        Ok(ServerCredentials {
            base_url: profile.product_url(product),
            access_token: profile.access_token.clone().unwrap_or_default(),
            user: profile.user.clone().unwrap_or_default(),
            password: profile.password.clone().unwrap_or_default(),
        })
    }

    fn server_ids(&self) -> Vec<String> {
        self.servers.iter().map(|s| s.id.clone()).collect()
    }
}

use std::fmt;

/// How a product authenticates requests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Whatever the server profile carries: token, user/password, or nothing
    Platform,
    /// An access token is mandatory
    Bearer,
}

/// Where a product reports its version and the oldest one we support
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionGate {
    pub endpoint: &'static str,
    /// JSON key holding the version string
    pub field: &'static str,
    pub minimum: &'static str,
}

/// Per-product wiring for the generic adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub name: &'static str,
    pub config_endpoint: &'static str,
    pub data_endpoint: &'static str,
    pub auth: AuthMode,
    pub version_gate: Option<VersionGate>,
}

const CONFIG_ENDPOINT: &str = "api/v1/system/logs/config";
const DATA_ENDPOINT: &str = "api/v1/system/logs/data";

const ARTIFACTORY: ProductDescriptor = ProductDescriptor {
    name: "Artifactory",
    config_endpoint: "api/system/logs/config",
    data_endpoint: "api/system/logs/data",
    auth: AuthMode::Platform,
    version_gate: Some(VersionGate {
        endpoint: "api/system/version",
        field: "version",
        minimum: "7.16.0",
    }),
};

const XRAY: ProductDescriptor = ProductDescriptor {
    name: "Xray",
    config_endpoint: CONFIG_ENDPOINT,
    data_endpoint: DATA_ENDPOINT,
    auth: AuthMode::Bearer,
    version_gate: Some(VersionGate {
        endpoint: "api/v1/system/version",
        field: "xray_version",
        minimum: "3.18.0",
    }),
};

const MISSION_CONTROL: ProductDescriptor = ProductDescriptor {
    name: "Mission Control",
    config_endpoint: CONFIG_ENDPOINT,
    data_endpoint: DATA_ENDPOINT,
    auth: AuthMode::Bearer,
    version_gate: None,
};

const PIPELINES: ProductDescriptor = ProductDescriptor {
    name: "Pipelines",
    config_endpoint: CONFIG_ENDPOINT,
    data_endpoint: DATA_ENDPOINT,
    auth: AuthMode::Bearer,
    version_gate: Some(VersionGate {
        endpoint: "api/v1/system/info",
        field: "version",
        minimum: "1.13.0",
    }),
};

const DISTRIBUTION: ProductDescriptor = ProductDescriptor {
    name: "Distribution",
    config_endpoint: CONFIG_ENDPOINT,
    data_endpoint: DATA_ENDPOINT,
    auth: AuthMode::Bearer,
    version_gate: Some(VersionGate {
        endpoint: "api/v1/system/info",
        field: "version",
        minimum: "2.7.0",
    }),
};

/// The remote products live-logs can read from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Product {
    Artifactory,
    Xray,
    MissionControl,
    Pipelines,
    Distribution,
}

impl Product {
    pub const ALL: [Product; 5] = [
        Product::Artifactory,
        Product::Xray,
        Product::MissionControl,
        Product::Pipelines,
        Product::Distribution,
    ];

    /// Short id used on the command line
    pub fn id(self) -> &'static str {
        match self {
            Product::Artifactory => "rt",
            Product::Xray => "xr",
            Product::MissionControl => "mc",
            Product::Pipelines => "pl",
            Product::Distribution => "ds",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|product| product.id() == id)
    }

    pub fn all_ids() -> Vec<String> {
        Self::ALL.iter().map(|p| p.id().to_string()).collect()
    }

    pub fn descriptor(self) -> &'static ProductDescriptor {
        match self {
            Product::Artifactory => &ARTIFACTORY,
            Product::Xray => &XRAY,
            Product::MissionControl => &MISSION_CONTROL,
            Product::Pipelines => &PIPELINES,
            Product::Distribution => &DISTRIBUTION,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

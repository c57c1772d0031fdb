//! Cloud deployment identifiers

use serde::{Deserialize, Serialize};

/// Environment variable holding the cloud environment id.
pub const WG_CLOUD_ENVIRONMENT_ID: &str = "WG_CLOUD_ENVIRONMENT_ID";
/// Environment variable holding the cloud project id.
pub const WG_CLOUD_PROJECT_ID: &str = "WG_CLOUD_PROJECT_ID";
/// Environment variable holding the cloud deployment id.
pub const WG_CLOUD_DEPLOYMENT_ID: &str = "WG_CLOUD_DEPLOYMENT_ID";

/// Identifiers of the cloud deployment the process runs in.
///
/// Empty values are normalized to `None` by the constructors, so `Some` always
/// means "non-empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// `environmentID` field value
    pub environment_id: Option<String>,
    /// `projectID` field value
    pub project_id: Option<String>,
    /// `deploymentID` field value
    pub deployment_id: Option<String>,
}

impl CloudConfig {
    /// Read the `WG_CLOUD_*` variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use wg_log::CloudConfig;
    ///
    /// let vars = HashMap::from([("WG_CLOUD_PROJECT_ID", "proj-1")]);
    /// let cloud = CloudConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));
    /// assert_eq!(cloud.project_id.as_deref(), Some("proj-1"));
    /// assert_eq!(cloud.environment_id, None);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            environment_id: non_empty(WG_CLOUD_ENVIRONMENT_ID),
            project_id: non_empty(WG_CLOUD_PROJECT_ID),
            deployment_id: non_empty(WG_CLOUD_DEPLOYMENT_ID),
        }
    }

    /// Set the environment id
    #[must_use]
    pub fn with_environment_id(mut self, id: impl Into<String>) -> Self {
        self.environment_id = Some(id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Set the project id
    #[must_use]
    pub fn with_project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Set the deployment id
    #[must_use]
    pub fn with_deployment_id(mut self, id: impl Into<String>) -> Self {
        self.deployment_id = Some(id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Check if no identifier is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environment_id.is_none() && self.project_id.is_none() && self.deployment_id.is_none()
    }
}

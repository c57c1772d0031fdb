//! Base fields attached to every structured logger

use std::ffi::OsString;
use std::io;

use crate::config::CloudConfig;
use crate::field::Field;

/// Host name field
pub const HOSTNAME: &str = "hostname";
/// Process id field
pub const PID: &str = "pid";
/// Cloud environment id field
pub const ENVIRONMENT_ID: &str = "environmentID";
/// Cloud project id field
pub const PROJECT_ID: &str = "projectID";
/// Cloud deployment id field
pub const DEPLOYMENT_ID: &str = "deploymentID";

/// Host name used when the OS lookup fails
pub const UNKNOWN_HOST: &str = "unknown";

/// Build the base fields for a structured logger.
///
/// `hostname` and `pid` are always present. `environmentID` and `projectID`
/// appear when set. `deploymentID` appears whenever the *project* id is set,
/// carrying the deployment id or `""`; other services key their log queries
/// on that shape.
pub fn base_fields(cloud: &CloudConfig) -> Vec<Field> {
    let mut fields = vec![
        Field::string(HOSTNAME, resolve_hostname(hostname::get())),
        Field::uint(PID, u64::from(std::process::id())),
    ];

    if let Some(environment_id) = &cloud.environment_id {
        fields.push(Field::string(ENVIRONMENT_ID, environment_id.clone()));
    }
    if let Some(project_id) = &cloud.project_id {
        fields.push(Field::string(PROJECT_ID, project_id.clone()));
        fields.push(Field::string(
            DEPLOYMENT_ID,
            cloud.deployment_id.clone().unwrap_or_default(),
        ));
    }

    fields
}

fn resolve_hostname(lookup: io::Result<OsString>) -> String {
    lookup
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

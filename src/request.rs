//! What the user asked for, validated from command-line flags.

use crate::aws::ec2::{LaunchSpecification, launch_specification};
use crate::error::UsageError;

/// Flags consumed by `launch`; all four are required.
#[derive(Debug, Clone, Default)]
pub struct LaunchFlags {
    pub ami: Option<String>,
    pub instance_type: Option<String>,
    pub subnet: Option<String>,
    pub security_group: Option<String>,
}

/// A validated request against a single instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceRequest {
    /// Start an existing instance.
    Start { instance_id: String },
    /// Launch a new instance from a full specification.
    Launch(LaunchSpecification),
}

impl InstanceRequest {
    pub fn start(instance_id: Option<String>) -> Result<Self, UsageError> {
        let instance_id = instance_id.ok_or(UsageError::MissingInstanceId)?;
        Ok(Self::Start { instance_id })
    }

    pub fn launch(flags: LaunchFlags) -> Result<Self, UsageError> {
        match flags {
            LaunchFlags {
                ami: Some(ami),
                instance_type: Some(instance_type),
                subnet: Some(subnet),
                security_group: Some(security_group),
            } => Ok(Self::Launch(launch_specification(
                &ami,
                &instance_type,
                &subnet,
                &security_group,
            ))),
            _ => Err(UsageError::MissingLaunchFlags),
        }
    }
}

use crate::aws::ec2::types::LaunchSpecification;
use crate::error::ApiError;

/// The two EC2 control-plane operations this crate drives.
pub trait Ec2Api {
    /// `StartInstances` for a single instance.
    fn start_instances(&self, instance_id: &str) -> Result<(), ApiError>;

    /// `RunInstances`; returns the id of the first instance created.
    fn run_instances(&self, spec: &LaunchSpecification) -> Result<String, ApiError>;
}

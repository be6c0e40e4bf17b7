//! # Launch Specification Defaults
//!
//! Builds the `LaunchSpecification` used by `launch`. Only the image,
//! instance type, subnet and security group vary; storage and networking
//! are fixed.

use crate::aws::ec2::types::*;

/// Root device of the launched instance.
pub const ROOT_DEVICE_NAME: &str = "/dev/sda1";
/// Root volume size in GiB.
pub const ROOT_VOLUME_SIZE_GIB: u32 = 100;
pub const ROOT_VOLUME_TYPE: &str = "gp3";
pub const ROOT_VOLUME_IOPS: u32 = 3000;
/// Root volume throughput in MiB/s.
pub const ROOT_VOLUME_THROUGHPUT: u32 = 125;

/// Creates the specification for a single instance.
///
/// # Arguments
/// * `image_id` - The AMI to boot.
/// * `instance_type` - The instance type (e.g., "g5.xlarge").
/// * `subnet_id` - Subnet for the primary network interface.
/// * `security_group_id` - Security group for the primary network interface.
pub fn launch_specification(
    image_id: &str,
    instance_type: &str,
    subnet_id: &str,
    security_group_id: &str,
) -> LaunchSpecification {
    LaunchSpecification {
        min_count: 1,
        max_count: 1,
        image_id: image_id.to_string(),
        instance_type: instance_type.to_string(),
        // Stopping keeps the root volume around for a later `start`.
        instance_initiated_shutdown_behavior: "stop".to_string(),
        disable_api_termination: false,
        ebs_optimized: true,
        block_device_mappings: vec![BlockDeviceMapping {
            device_name: ROOT_DEVICE_NAME.to_string(),
            ebs: EbsBlockDevice {
                delete_on_termination: true,
                volume_size: ROOT_VOLUME_SIZE_GIB,
                volume_type: ROOT_VOLUME_TYPE.to_string(),
                encrypted: false,
                iops: ROOT_VOLUME_IOPS,
                throughput: ROOT_VOLUME_THROUGHPUT,
            },
        }],
        network_interfaces: vec![NetworkInterface {
            device_index: 0,
            subnet_id: subnet_id.to_string(),
            groups: vec![security_group_id.to_string()],
            associate_public_ip_address: true,
        }],
    }
}

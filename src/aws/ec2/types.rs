//! # EC2 Launch Specification Types
//!
//! Rust structs for the `RunInstances` parameters this tool sends. They
//! serialize to JSON with the API's field names (used for `--dry_run`
//! output) and flatten to the dotted query-parameter form the API expects
//! on the wire.

use serde::{Deserialize, Serialize};

/// Parameters of a `RunInstances` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchSpecification {
    pub min_count: u32,
    pub max_count: u32,
    /// The AMI to boot from.
    pub image_id: String,
    /// e.g. "g5.xlarge".
    pub instance_type: String,
    /// "stop" or "terminate".
    pub instance_initiated_shutdown_behavior: String,
    pub disable_api_termination: bool,
    pub ebs_optimized: bool,
    pub block_device_mappings: Vec<BlockDeviceMapping>,
    pub network_interfaces: Vec<NetworkInterface>,
}

/// A block device attached at launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockDeviceMapping {
    pub device_name: String,
    pub ebs: EbsBlockDevice,
}

/// EBS volume parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EbsBlockDevice {
    pub delete_on_termination: bool,
    /// GiB.
    pub volume_size: u32,
    pub volume_type: String,
    pub encrypted: bool,
    pub iops: u32,
    /// MiB/s.
    pub throughput: u32,
}

/// A network interface created with the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterface {
    pub device_index: u32,
    pub subnet_id: String,
    /// Security group ids.
    pub groups: Vec<String>,
    pub associate_public_ip_address: bool,
}

impl LaunchSpecification {
    /// Flattens the specification into `RunInstances` query parameters.
    /// List members are 1-indexed, as the query API requires.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("ImageId".to_string(), self.image_id.clone()),
            ("InstanceType".to_string(), self.instance_type.clone()),
            ("MinCount".to_string(), self.min_count.to_string()),
            ("MaxCount".to_string(), self.max_count.to_string()),
            (
                "InstanceInitiatedShutdownBehavior".to_string(),
                self.instance_initiated_shutdown_behavior.clone(),
            ),
            (
                "DisableApiTermination".to_string(),
                self.disable_api_termination.to_string(),
            ),
            ("EbsOptimized".to_string(), self.ebs_optimized.to_string()),
        ];

        for (i, bdm) in self.block_device_mappings.iter().enumerate() {
            let p = format!("BlockDeviceMapping.{}", i + 1);
            let ebs = &bdm.ebs;
            params.extend([
                (format!("{}.DeviceName", p), bdm.device_name.clone()),
                (
                    format!("{}.Ebs.DeleteOnTermination", p),
                    ebs.delete_on_termination.to_string(),
                ),
                (format!("{}.Ebs.VolumeSize", p), ebs.volume_size.to_string()),
                (format!("{}.Ebs.VolumeType", p), ebs.volume_type.clone()),
                (format!("{}.Ebs.Encrypted", p), ebs.encrypted.to_string()),
                (format!("{}.Ebs.Iops", p), ebs.iops.to_string()),
                (format!("{}.Ebs.Throughput", p), ebs.throughput.to_string()),
            ]);
        }

        for (i, ni) in self.network_interfaces.iter().enumerate() {
            let p = format!("NetworkInterface.{}", i + 1);
            params.extend([
                (format!("{}.DeviceIndex", p), ni.device_index.to_string()),
                (format!("{}.SubnetId", p), ni.subnet_id.clone()),
                (
                    format!("{}.AssociatePublicIpAddress", p),
                    ni.associate_public_ip_address.to_string(),
                ),
            ]);
            for (j, group) in ni.groups.iter().enumerate() {
                params.push((format!("{}.SecurityGroupId.{}", p, j + 1), group.clone()));
            }
        }

        params
    }
}

//! # Instance Operations
//!
//! The two call sites of the retry executor: starting an existing instance
//! and launching a new one.

use crate::aws::ec2::classify::{classify_launch, classify_start};
use crate::aws::ec2::{Ec2Api, LaunchSpecification};
use crate::error::ApiError;
use crate::request::InstanceRequest;
use crate::retry::{Outcome, Retrier, Sleeper};

/// How a `start` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

/// Result of [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completed {
    Start(StartOutcome),
    /// Id of the newly launched instance.
    Launch(String),
}

/// Starts `instance_id`, retrying while the instance is not yet startable.
pub fn start_instance<A, S>(
    api: &A,
    retrier: &Retrier<S>,
    instance_id: &str,
) -> Result<StartOutcome, ApiError>
where
    A: Ec2Api + ?Sized,
    S: Sleeper,
{
    let waiting_for = format!("Instance {} not yet ready", instance_id);
    match retrier.run(&waiting_for, || api.start_instances(instance_id), classify_start)? {
        Outcome::Completed(()) => {
            tracing::info!("Started instance {}", instance_id);
            Ok(StartOutcome::Started)
        }
        Outcome::AlreadySatisfied => {
            tracing::info!("Instance {} is already running", instance_id);
            Ok(StartOutcome::AlreadyRunning)
        }
    }
}

/// Launches one instance, retrying on capacity shortages. Returns its id.
pub fn launch_instance<A, S>(
    api: &A,
    retrier: &Retrier<S>,
    spec: &LaunchSpecification,
) -> Result<String, ApiError>
where
    A: Ec2Api + ?Sized,
    S: Sleeper,
{
    let waiting_for = format!("Insufficient capacity for {}", spec.instance_type);
    match retrier.run(&waiting_for, || api.run_instances(spec), classify_launch)? {
        Outcome::Completed(instance_id) => {
            tracing::info!("Launched instance {}", instance_id);
            Ok(instance_id)
        }
        // Launch never classifies an error as already satisfied.
        Outcome::AlreadySatisfied => Err(ApiError::Decode(
            "RunInstances reported success without an instance".to_string(),
        )),
    }
}

/// Dispatches a validated request.
pub fn execute<A, S>(
    api: &A,
    retrier: &Retrier<S>,
    request: &InstanceRequest,
) -> Result<Completed, ApiError>
where
    A: Ec2Api + ?Sized,
    S: Sleeper,
{
    match request {
        InstanceRequest::Start { instance_id } => {
            start_instance(api, retrier, instance_id).map(Completed::Start)
        }
        InstanceRequest::Launch(spec) => launch_instance(api, retrier, spec).map(Completed::Launch),
    }
}

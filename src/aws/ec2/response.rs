//! Decoding of EC2 query-API responses.

use crate::aws::xml;
use crate::error::ApiError;

/// Turns a non-2xx response into an [`ApiError::Service`].
///
/// EC2 errors look like
/// `<Response><Errors><Error><Code>..</Code><Message>..</Message></Error></Errors><RequestID>..</RequestID></Response>`.
pub fn decode_error(status: u16, body: &str) -> ApiError {
    let error = xml::section(body, "Error").unwrap_or(body);
    ApiError::Service {
        status,
        code: xml::first_text(error, "Code").unwrap_or_else(|| "Unknown".to_string()),
        message: xml::first_text(error, "Message").unwrap_or_else(|| body.trim().to_string()),
        request_id: xml::first_text(body, "RequestID")
            .or_else(|| xml::first_text(body, "requestId"))
            .unwrap_or_default(),
    }
}

/// Id of the first instance in a `RunInstancesResponse`.
pub fn decode_run_instances(body: &str) -> Result<String, ApiError> {
    let instances = xml::section(body, "instancesSet")
        .ok_or_else(|| ApiError::Decode("RunInstances response has no instancesSet".into()))?;
    xml::first_text(instances, "instanceId")
        .ok_or_else(|| ApiError::Decode("RunInstances response has no instanceId".into()))
}

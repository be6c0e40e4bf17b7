use chrono::Utc;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use crate::aws::ec2::api::Ec2Api;
use crate::aws::ec2::response::{decode_error, decode_run_instances};
use crate::aws::ec2::types::LaunchSpecification;
use crate::aws::sigv4::{self, FORM_CONTENT_TYPE, Scope};
use crate::aws::types::Credentials;
use crate::error::ApiError;

const API_VERSION: &str = "2016-11-15";
const SERVICE: &str = "ec2";

/// Blocking EC2 query-API client for one region.
#[derive(Debug, Clone)]
pub struct Ec2Client {
    http: reqwest::blocking::Client,
    endpoint: Url,
    host: String,
    region: String,
    credentials: Credentials,
}

/// Default regional endpoint, e.g. `https://ec2.us-east-1.amazonaws.com/`.
pub fn default_endpoint(region: &str) -> String {
    format!("https://ec2.{}.amazonaws.com/", region)
}

impl Ec2Client {
    pub fn new(region: &str, credentials: Credentials) -> anyhow::Result<Self> {
        Self::with_endpoint(region, &default_endpoint(region), credentials)
    }

    /// Client for a non-default endpoint (VPC endpoints, local emulators).
    pub fn with_endpoint(
        region: &str,
        endpoint: &str,
        credentials: Credentials,
    ) -> anyhow::Result<Self> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid endpoint URL {}: {}", endpoint, e))?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(h), Some(p)) => format!("{}:{}", h, p),
            (Some(h), None) => h.to_string(),
            (None, _) => anyhow::bail!("Endpoint URL {} has no host", endpoint),
        };
        Ok(Self {
            http: crate::client::BLOCKING_CLIENT.clone(),
            endpoint,
            host,
            region: region.to_string(),
            credentials,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Signs and POSTs one query-API action, returning the response body.
    fn call(&self, action: &str, mut params: Vec<(String, String)>) -> Result<String, ApiError> {
        params.insert(0, ("Action".to_string(), action.to_string()));
        params.insert(1, ("Version".to_string(), API_VERSION.to_string()));
        let body = sigv4::encode_form(&params);

        let scope = Scope {
            region: &self.region,
            service: SERVICE,
        };
        let headers = sigv4::sign(&self.credentials, scope, &self.host, &body, Utc::now());

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        tracing::debug!("POST {} Action={}", self.endpoint, action);
        let response = request
            .body(body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(decode_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl Ec2Api for Ec2Client {
    fn start_instances(&self, instance_id: &str) -> Result<(), ApiError> {
        self.call(
            "StartInstances",
            vec![("InstanceId.1".to_string(), instance_id.to_string())],
        )?;
        Ok(())
    }

    fn run_instances(&self, spec: &LaunchSpecification) -> Result<String, ApiError> {
        let body = self.call("RunInstances", spec.to_query_params())?;
        decode_run_instances(&body)
    }
}

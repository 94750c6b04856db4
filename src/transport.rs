use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::{wire, ServiceStatus, TransportFault, ValidationRequest, ValidationResult};

/// Base URL of the EU VIES REST service.
pub const VIES_ENDPOINT: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api";

/// Single-attempt request/response primitive behind [`VatClient`](crate::VatClient).
///
/// Implementations perform exactly one remote call per `send` and report any
/// failure as a [`TransportFault`]. The timeout bounds that one call.
pub trait Transport {
    fn send(
        &self,
        request: &ValidationRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<ValidationResult, TransportFault>> + Send;
}

/// HTTP binding to the VIES REST endpoints.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    status: ServiceStatus,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("countries", &self.status.countries.len())
            .finish()
    }
}

impl HttpTransport {
    /// Opens a binding by loading the service status from `endpoint`.
    ///
    /// Fails if the status document cannot be fetched and parsed within `timeout`.
    pub async fn connect(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportFault> {
        let endpoint = endpoint.into().trim_end_matches('/').to_owned();
        let http = reqwest::Client::new();

        let response = http
            .get(format!("{endpoint}/check-status"))
            .timeout(timeout)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportFault::new(format!("HTTP {status}: {body}")));
        }

        let parsed = serde_json::from_str::<wire::StatusResponse>(&body).map_err(|err| {
            TransportFault::new(format!("invalid service status JSON: {err}; body: {body}"))
        })?;

        Ok(Self {
            http,
            endpoint,
            status: parsed.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Member state availability as reported when the binding was opened.
    pub fn service_status(&self) -> &ServiceStatus {
        &self.status
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &ValidationRequest,
        timeout: Duration,
    ) -> Result<ValidationResult, TransportFault> {
        let response = self
            .http
            .post(format!("{}/check-vat-number", self.endpoint))
            .timeout(timeout)
            .json(&wire::CheckVatRequest::from(request))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let value = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(TransportFault::new(format!("HTTP {status}: {body}")));
            }
            Err(err) => {
                return Err(TransportFault::new(format!(
                    "invalid check response JSON: {err}; body: {body}"
                )));
            }
        };

        // A fault reported in the body takes precedence over the status line.
        if let Some(fault) = wire::fault_in(&value) {
            return Err(fault);
        }
        if !status.is_success() {
            return Err(TransportFault::new(format!("HTTP {status}: {body}")));
        }
        if !value.is_object() {
            return Err(TransportFault::new(format!(
                "unexpected check response shape: {body}"
            )));
        }

        Ok(ValidationResult(value))
    }
}

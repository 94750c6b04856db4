use std::fmt;

use tokio::time::sleep;

use crate::{
    options::RETRY_DELAY, ClientOptions, HttpTransport, Identifier, Result, Transport,
    ValidationRequest, ValidationResult, VatError, VIES_ENDPOINT,
};

/// Session against the VIES service with bounded, fixed-delay retry.
///
/// Lookups are sequential: a new attempt starts only after the previous one
/// has failed. Dropping the future returned by [`VatClient::fetch_details`]
/// cancels the lookup; wrap it in `tokio::time::timeout` for an overall deadline.
pub struct VatClient<T = HttpTransport> {
    transport: T,
    options: ClientOptions,
}

impl<T: fmt::Debug> fmt::Debug for VatClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VatClient")
            .field("transport", &self.transport)
            .field("options", &self.options)
            .finish()
    }
}

impl VatClient<HttpTransport> {
    /// Opens a session against the public VIES endpoint.
    pub async fn connect(options: ClientOptions) -> Result<Self> {
        Self::connect_to(VIES_ENDPOINT, options).await
    }

    /// Opens a session against another deployment of the VIES REST API.
    ///
    /// Connection failures are not retried.
    pub async fn connect_to(endpoint: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let transport = HttpTransport::connect(endpoint, options.timeout())
            .await
            .map_err(VatError::Connection)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = transport.endpoint(), "VIES session opened");

        Ok(Self::with_transport(transport, options))
    }
}

impl<T: Transport> VatClient<T> {
    /// Wraps an already opened transport.
    pub fn with_transport(transport: T, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up `identifier` in the register of `country_code`.
    ///
    /// Every fault is retried the same way, with [`RETRY_DELAY`] between
    /// attempts, until `max_attempts` is used up. The last fault is then
    /// returned as [`VatError::Retrieve`].
    pub async fn fetch_details(
        &self,
        identifier: impl Into<Identifier>,
        country_code: &str,
    ) -> Result<ValidationResult> {
        let request = ValidationRequest::new(identifier, country_code);
        let max_attempts = self.options.attempt_budget();
        let timeout = self.options.timeout();
        let mut attempt = 1usize;

        loop {
            match self.transport.send(&request, timeout).await {
                Ok(result) => return Ok(result),
                Err(fault) if attempt >= max_attempts => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(attempt, %fault, "VAT lookup failed, giving up");

                    return Err(VatError::Retrieve(fault));
                }
                Err(_fault) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt, fault = %_fault, "VAT lookup failed, retrying");

                    sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Ends the session.
    ///
    /// Timeouts are passed per call, so no process-wide setting is left to
    /// restore; consuming `self` keeps the teardown to exactly once.
    pub fn close(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("VIES session closed");
    }
}

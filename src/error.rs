/// Failure of a single remote call.
///
/// Returned by [`Transport`](crate::Transport) implementations. The client
/// retries on it and only ever surfaces it wrapped in a [`VatError`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportFault {
    message: String,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Fault description as reported by the transport or the remote service.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        Self { message }
    }
}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum VatError {
    /// The service description could not be loaded when opening the session.
    #[error("Impossible to connect to the VIES service: {0}")]
    Connection(TransportFault),
    /// Every attempt failed; carries the fault of the last one.
    #[error("Impossible to retrieve the VAT details: {0}")]
    Retrieve(TransportFault),
}

impl VatError {
    /// The underlying transport fault, whichever variant this is.
    pub fn fault(&self) -> &TransportFault {
        match self {
            Self::Connection(fault) | Self::Retrieve(fault) => fault,
        }
    }
}

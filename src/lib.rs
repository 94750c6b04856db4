//! `vies-http` is an async client for the EU VIES VAT number validation service.
//!
//! A [`VatClient`] session loads the service status once when it is opened and
//! then answers lookups through [`VatClient::fetch_details`], retrying failed
//! calls a bounded number of times with a fixed delay in between.
//!
//! ```no_run
//! use vies_http::{ClientOptions, VatClient};
//!
//! # async fn run() -> vies_http::Result<()> {
//! let client = VatClient::connect(ClientOptions::default()).await?;
//! let details = client.fetch_details("123456789", "de").await?;
//! println!("valid: {}, name: {:?}", details.is_valid(), details.name());
//! client.close();
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;
mod transport;
mod types;
mod wire;

pub use client::VatClient;
pub use error::{TransportFault, VatError};
pub use options::{ClientOptions, RETRY_DELAY};
pub use transport::{HttpTransport, Transport, VIES_ENDPOINT};
pub use types::{CountryStatus, Identifier, ServiceStatus, ValidationRequest, ValidationResult};

pub type Result<T> = std::result::Result<T, VatError>;

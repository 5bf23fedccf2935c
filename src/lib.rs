#![forbid(unsafe_code)]
//! mailgun_validator — client for the Mailgun address validation API
//!
//! ```no_run
//! # async fn run() -> Result<(), mailgun_validator::Error> {
//! let client = mailgun_validator::Client::new("pubkey-xxxx");
//! let report = client.validate("john.smith@gmail.com").await?;
//! println!("{} valid={}", report.address, report.is_valid);
//!
//! let batch = client.parse(["john@gmail.com", "hello@world.com"]).await?;
//! println!("parsed={:?} unparseable={:?}", batch.parsed, batch.unparseable);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub use client::{
    AddressList, AddressParts, Client, ClientBuilder, DECODE_BODY_LIMIT, DEFAULT_BASE_URL, Error,
    ParseOptions, ParseResult, RequestOptions, ValidationResult,
};

//! HL7 wire/boundary support.
//!
//! This crate provides the **JSON wire models** exchanged with the HL7 registration API and
//! the **classifiers** that turn a raw HTTP status and body into an [`hl7_core::Hl7Result`]:
//! - requests: registration, cancellation and eligibility, with benefit encoding applied
//! - responses: header + detail line shapes, tolerant of unknown fields
//! - classification: transport, parse, functional and line-item outcomes
//!
//! This crate does not perform HTTP itself. Callers own the transport and session; they hand
//! over the status code and body text they received.

pub mod classify;
pub mod request;
pub mod response;

pub use classify::{
    classify_cancellation, classify_eligibility, classify_registration, classify_unauthenticated,
};
pub use request::{
    CancellationRequest, EligibilityRequest, ManualMode, RegistrationRequest, RequestMode,
};
pub use response::{
    CancellationHeader, CancellationResponse, DetailLine, EligibilityResponse, HeaderedResponse,
    RegistrationHeader, RegistrationResponse, RejectionStatus,
};

use hl7_core::BenefitError;

/// Errors returned by the `hl7-wire` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error(transparent)]
    Benefit(#[from] BenefitError),
}

/// Type alias for Results that can fail with a [`WireError`].
pub type WireResult<T> = Result<T, WireError>;

/// Parse JSON text into `T`, reporting the path of the first field that does not fit.
pub(crate) fn parse_json<T>(what: &str, text: &str) -> WireResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let parsed: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        WireError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })?;
    deserializer.end()?;
    Ok(parsed)
}

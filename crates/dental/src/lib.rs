//! Dental domain support for HL7 benefit submissions.
//!
//! This crate models permanent teeth in FDI (ISO 3950) notation, the tooth surfaces that can be
//! treated, and the compatibility rules between them. It also owns [`DentalBenefit`], the dental
//! variant of a billable benefit, because building one requires those rules.
//!
//! Encoding a list of benefits into request parameters lives in `hl7-core`. This crate has no
//! knowledge of request slots or of medical benefits.

pub mod benefit;
pub mod catalog;
pub mod piece;
pub mod surface;
pub mod validation;

pub use benefit::DentalBenefit;
pub use catalog::{find_by_fdi, teeth, Dentition, ToothEntry};
pub use piece::{DentalPiece, DentalPieceType};
pub use surface::{DentalSurface, SurfaceSet};
pub use validation::{DentalSurfaceMatrix, DentalValidationResult};

use hl7_types::CodeError;

/// Errors returned by the `dental` crate.
#[derive(Debug, thiserror::Error)]
pub enum DentalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported FDI tooth number: {0}")]
    InvalidFdi(u8),

    #[error("unknown dental surface code: '{0}'")]
    UnknownSurface(char),

    #[error("invalid piece/surface combination: {}", .0.message())]
    InvalidCombination(DentalValidationResult),

    #[error("dental HL7 value exceeds {max} characters (actual: {len})")]
    ValueTooLong { len: usize, max: usize },

    #[error(transparent)]
    Code(#[from] CodeError),
}

/// Type alias for Results that can fail with a [`DentalError`].
pub type DentalResult<T> = Result<T, DentalError>;

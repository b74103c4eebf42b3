//! # HL7 Core
//!
//! Core logic for turning a user's benefit selection into the `param1`/`param2`/`param3`
//! request fields of the HL7 registration API, and for classifying what the API answers.
//!
//! This crate is a pure, synchronous transformation layer:
//! - [`benefit`]: the billable units (medical or dental) and their HL7 fragments
//! - [`mapper`]: the length-budgeted encoder that packs benefits into the three parameter slots
//! - [`result`]: the closed outcome type for remote calls (ok / partial / rejected / error)
//! - [`report`]: user-facing rendering of an outcome
//!
//! **No transport concerns**: HTTP, sessions and JSON wire models belong in `hl7-wire`.

pub mod benefit;
pub mod config;
pub mod constants;
pub mod error;
pub mod mapper;
pub mod report;
pub mod result;

pub use benefit::{BenefitItem, BenefitKind, MedicalBenefitItem, MessageType};
pub use config::EncoderConfig;
pub use error::{BenefitError, BenefitResult};
pub use mapper::{encode, split_into_params, BenefitParams, BenefitRequestMapper};
pub use report::{OutcomeReport, Severity};
pub use result::{Hl7Error, Hl7ErrorOrigin, Hl7ItemError, Hl7ItemErrorOrigin, Hl7Result, Hl7Status};

// Dental types are part of the benefit vocabulary; re-export so callers need one import.
pub use dental::{DentalBenefit, DentalPiece, DentalSurface, DentalValidationResult, SurfaceSet};

/// Check a dental piece/surfaces pair before building a [`DentalBenefit`].
///
/// Editors call this while the user is still choosing; every violated rule is reported.
pub fn validate_dental_combination(
    piece: Option<DentalPiece>,
    surfaces: &SurfaceSet,
) -> DentalValidationResult {
    dental::DentalSurfaceMatrix::validate(piece, surfaces)
}

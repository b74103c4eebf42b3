use dental::DentalError;
use hl7_types::CodeError;

/// Errors raised while building or encoding benefits.
///
/// Encoding never partially applies: when any of these is returned, no parameter was produced.
#[derive(Debug, thiserror::Error)]
pub enum BenefitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dental and medical benefits cannot be mixed in one submission")]
    MixedKinds,

    #[error("only one dental benefit is allowed per submission (found {0})")]
    TooManyDental(usize),

    #[error("dental benefit exceeds the limit of {max} characters (actual: {len})")]
    DentalTooLong { len: usize, max: usize },

    #[error("medical benefits exceed the total limit of {max} characters (actual: {len})")]
    MedicalTooLong { len: usize, max: usize },

    #[error("encoded benefits need {needed} parameters but only {available} are available")]
    TooManySlices { needed: usize, available: usize },

    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Dental(#[from] DentalError),
}

pub type BenefitResult<T> = std::result::Result<T, BenefitError>;

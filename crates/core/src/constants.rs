//! Wire constants for HL7 benefit parameters.

/// Maximum length of each `paramN` field (backend column is `varchar(255)`).
pub const MAX_LENGTH_PER_PARAM: usize = 255;

/// Number of parameter slots on a registration request.
pub const MAX_PARAMS: usize = 3;

/// Number of parameter slots on a cancellation request.
pub const MAX_PARAMS_CANCELLATION: usize = 2;

/// Aggregate budget for medical benefits.
pub const MAX_LENGTH_MEDICAL: usize = MAX_LENGTH_PER_PARAM * MAX_PARAMS;

/// Aggregate budget for a dental benefit, which must fit in `param1`.
pub const MAX_LENGTH_DENTAL: usize = MAX_LENGTH_PER_PARAM;

/// `param1` when there is nothing to bill. The backend rejects a blank `param1`.
pub const EMPTY_PARAM_VALUE: &str = "0^*0*0**";

/// Ends every benefit segment; the encoder prefers to cut right after one.
pub const SEGMENT_TERMINATOR: &str = "**";

/// Starts every medical segment after the first.
pub const SEGMENT_SEPARATOR: &str = "|";

/// Environment variable holding an override for [`MAX_LENGTH_PER_PARAM`].
pub const PARAM_MAX_LENGTH_ENV: &str = "HL7_PARAM_MAX_LENGTH";

/// Environment variable holding an override for [`MAX_PARAMS`].
pub const PARAM_SLOTS_ENV: &str = "HL7_PARAM_SLOTS";

//! Encoder configuration.
//!
//! Resolved once at process startup and then passed into the mapper. The mapper never reads
//! environment variables itself.

use crate::constants::{
    MAX_LENGTH_PER_PARAM, MAX_PARAMS, MAX_PARAMS_CANCELLATION, PARAM_MAX_LENGTH_ENV,
    PARAM_SLOTS_ENV,
};
use crate::{BenefitError, BenefitResult};

/// Length budgets for the parameter slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    max_length_per_param: usize,
    max_params: usize,
}

impl EncoderConfig {
    /// Create a new `EncoderConfig`.
    ///
    /// `max_length_per_param` must be in `1..=255` and `max_params` in `1..=3`; the wire has no
    /// room for anything larger.
    pub fn new(max_length_per_param: usize, max_params: usize) -> BenefitResult<Self> {
        if !(1..=MAX_LENGTH_PER_PARAM).contains(&max_length_per_param) {
            return Err(BenefitError::InvalidInput(format!(
                "max_length_per_param must be between 1 and {MAX_LENGTH_PER_PARAM}, got {max_length_per_param}"
            )));
        }
        if !(1..=MAX_PARAMS).contains(&max_params) {
            return Err(BenefitError::InvalidInput(format!(
                "max_params must be between 1 and {MAX_PARAMS}, got {max_params}"
            )));
        }

        Ok(Self {
            max_length_per_param,
            max_params,
        })
    }

    /// Budgets for cancellation requests, which only carry `param1` and `param2`.
    pub fn cancellation() -> Self {
        Self {
            max_length_per_param: MAX_LENGTH_PER_PARAM,
            max_params: MAX_PARAMS_CANCELLATION,
        }
    }

    pub fn max_length_per_param(&self) -> usize {
        self.max_length_per_param
    }

    pub fn max_params(&self) -> usize {
        self.max_params
    }

    pub fn max_medical_len(&self) -> usize {
        self.max_length_per_param * self.max_params
    }

    pub fn max_dental_len(&self) -> usize {
        self.max_length_per_param
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_length_per_param: MAX_LENGTH_PER_PARAM,
            max_params: MAX_PARAMS,
        }
    }
}

/// Build an [`EncoderConfig`] from the raw values of the `HL7_PARAM_MAX_LENGTH` and
/// `HL7_PARAM_SLOTS` environment variables.
///
/// `None` or blank values fall back to the defaults.
pub fn encoder_config_from_env_values(
    max_length: Option<String>,
    slots: Option<String>,
) -> BenefitResult<EncoderConfig> {
    let defaults = EncoderConfig::default();
    let max_length = parse_env_usize(PARAM_MAX_LENGTH_ENV, max_length)?
        .unwrap_or(defaults.max_length_per_param);
    let slots = parse_env_usize(PARAM_SLOTS_ENV, slots)?.unwrap_or(defaults.max_params);

    EncoderConfig::new(max_length, slots)
}

fn parse_env_usize(name: &str, value: Option<String>) -> BenefitResult<Option<usize>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                BenefitError::InvalidInput(format!("{name} must be a positive integer, got '{v}'"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_wire_contract() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_length_per_param(), 255);
        assert_eq!(config.max_params(), 3);
        assert_eq!(config.max_medical_len(), 765);
        assert_eq!(config.max_dental_len(), 255);
    }

    #[test]
    fn cancellation_preset_has_two_slots() {
        let config = EncoderConfig::cancellation();
        assert_eq!(config.max_params(), 2);
        assert_eq!(config.max_medical_len(), 510);
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert!(matches!(
            EncoderConfig::new(0, 3),
            Err(BenefitError::InvalidInput(msg)) if msg.contains("max_length_per_param")
        ));
        assert!(EncoderConfig::new(256, 3).is_err());
        assert!(matches!(
            EncoderConfig::new(255, 4),
            Err(BenefitError::InvalidInput(msg)) if msg.contains("max_params")
        ));
        assert!(EncoderConfig::new(255, 0).is_err());
        assert!(EncoderConfig::new(100, 1).is_ok());
    }

    #[test]
    fn env_values_fall_back_to_defaults() {
        assert_eq!(
            encoder_config_from_env_values(None, None).expect("defaults"),
            EncoderConfig::default()
        );
        assert_eq!(
            encoder_config_from_env_values(Some("  ".into()), Some(String::new()))
                .expect("blank is default"),
            EncoderConfig::default()
        );
    }

    #[test]
    fn env_values_override_and_validate() {
        let config = encoder_config_from_env_values(Some(" 200 ".into()), Some("2".into()))
            .expect("valid overrides");
        assert_eq!(config.max_length_per_param(), 200);
        assert_eq!(config.max_params(), 2);

        let err = encoder_config_from_env_values(Some("abc".into()), None)
            .expect_err("non-numeric");
        assert!(matches!(err, BenefitError::InvalidInput(msg) if msg.contains(PARAM_MAX_LENGTH_ENV)));

        assert!(encoder_config_from_env_values(None, Some("9".into())).is_err());
    }
}

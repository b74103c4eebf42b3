//! Benefit request mapper: packs a benefit list into the `param1`/`param2`/`param3` fields.
//!
//! - **Dental**: at most one item; its value goes verbatim into `param1`
//!   (e.g. `1^*35*V*O020801*P*1**`).
//! - **Medical**: any number of items; the *total* quantity leads, and later segments are
//!   separated by `|` (e.g. `3^*660001*2**|*660015*1**`). The content is then cut into slices of
//!   at most 255 characters, preferring to cut right after a `**` terminator.
//! - **Nothing to bill**: `param1 = "0^*0*0**"`, the other two empty.
//!
//! Encoding either fully succeeds or fails; nothing is truncated.

use serde::{Deserialize, Serialize};

use crate::benefit::{BenefitItem, MedicalBenefitItem};
use crate::constants::{EMPTY_PARAM_VALUE, SEGMENT_SEPARATOR, SEGMENT_TERMINATOR};
use crate::{BenefitError, BenefitResult, DentalBenefit, EncoderConfig};

/// The three encoded request fields. Unused slots are empty strings, never absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitParams {
    pub param1: String,
    pub param2: String,
    pub param3: String,
}

impl BenefitParams {
    /// The "no benefits" sentinel.
    pub fn empty() -> Self {
        Self {
            param1: EMPTY_PARAM_VALUE.to_string(),
            param2: String::new(),
            param3: String::new(),
        }
    }

    fn from_chunks(chunks: &[&str]) -> Self {
        let slot = |i: usize| chunks.get(i).map(|c| c.to_string()).unwrap_or_default();
        Self {
            param1: chunks
                .first()
                .map_or_else(|| EMPTY_PARAM_VALUE.to_string(), |c| c.to_string()),
            param2: slot(1),
            param3: slot(2),
        }
    }

    pub fn as_array(&self) -> [&str; 3] {
        [&self.param1, &self.param2, &self.param3]
    }

    /// Number of non-empty slots.
    pub fn used_slots(&self) -> usize {
        self.as_array().iter().filter(|p| !p.is_empty()).count()
    }

    /// `param1 + param2 + param3`.
    pub fn joined(&self) -> String {
        self.as_array().concat()
    }
}

enum Submission<'a> {
    Empty,
    Dental(&'a DentalBenefit),
    Medical(Vec<&'a MedicalBenefitItem>),
}

fn classify(benefits: &[BenefitItem]) -> BenefitResult<Submission<'_>> {
    let mut dental = Vec::new();
    let mut medical = Vec::new();
    for benefit in benefits {
        match benefit {
            BenefitItem::Medical(item) => medical.push(item),
            BenefitItem::Dental(item) => dental.push(item),
        }
    }

    match (dental.as_slice(), medical.is_empty()) {
        ([], true) => Ok(Submission::Empty),
        ([], false) => Ok(Submission::Medical(medical)),
        (_, false) => Err(BenefitError::MixedKinds),
        ([single], true) => Ok(Submission::Dental(*single)),
        (many, true) => Err(BenefitError::TooManyDental(many.len())),
    }
}

/// Encodes benefit lists under a fixed [`EncoderConfig`].
///
/// Stateless apart from its configuration; share it freely.
#[derive(Clone, Debug, Default)]
pub struct BenefitRequestMapper {
    config: EncoderConfig,
}

impl BenefitRequestMapper {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `benefits` into request parameters.
    ///
    /// # Errors
    ///
    /// - [`BenefitError::MixedKinds`] if dental and medical items are mixed;
    /// - [`BenefitError::TooManyDental`] for more than one dental item;
    /// - [`BenefitError::DentalTooLong`] if the dental value does not fit one slot;
    /// - [`BenefitError::MedicalTooLong`] if the medical content exceeds the aggregate budget;
    /// - [`BenefitError::TooManySlices`] if boundary-preserving cuts need more slots than
    ///   configured.
    pub fn apply(&self, benefits: &[BenefitItem]) -> BenefitResult<BenefitParams> {
        self.encode_list(benefits).inspect_err(|err| {
            tracing::warn!(items = benefits.len(), error = %err, "rejected benefit list");
        })
    }

    fn encode_list(&self, benefits: &[BenefitItem]) -> BenefitResult<BenefitParams> {
        match classify(benefits)? {
            Submission::Empty => Ok(BenefitParams::empty()),
            Submission::Dental(item) => self.encode_dental(item),
            Submission::Medical(items) => self.encode_medical(&items),
        }
    }

    fn encode_dental(&self, item: &DentalBenefit) -> BenefitResult<BenefitParams> {
        let value = item.value();
        let max = self.config.max_dental_len();
        if value.len() > max {
            return Err(BenefitError::DentalTooLong {
                len: value.len(),
                max,
            });
        }

        tracing::debug!(len = value.len(), "encoded dental benefit");
        Ok(BenefitParams::from_chunks(&[value]))
    }

    fn encode_medical(&self, items: &[&MedicalBenefitItem]) -> BenefitResult<BenefitParams> {
        let total_quantity: u64 = items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum();
        if total_quantity == 0 {
            return Ok(BenefitParams::empty());
        }

        // Budget is checked before rendering.
        let len = medical_content_len(total_quantity, items);
        let max = self.config.max_medical_len();
        if len > max {
            return Err(BenefitError::MedicalTooLong { len, max });
        }

        let content = medical_content(total_quantity, items);

        let chunks = split_into_params(&content, self.config.max_length_per_param());
        if chunks.len() > self.config.max_params() {
            return Err(BenefitError::TooManySlices {
                needed: chunks.len(),
                available: self.config.max_params(),
            });
        }

        tracing::debug!(
            items = items.len(),
            total_quantity,
            content_len = content.len(),
            slots = chunks.len(),
            "encoded medical benefits"
        );
        Ok(BenefitParams::from_chunks(&chunks))
    }
}

/// Encode with the default (registration) budgets: 3 slots of 255 characters.
pub fn encode(benefits: &[BenefitItem]) -> BenefitResult<BenefitParams> {
    BenefitRequestMapper::default().apply(benefits)
}

// The first segment leads with the total quantity of the whole submission, not its own.
fn medical_content(total_quantity: u64, items: &[&MedicalBenefitItem]) -> String {
    let mut content = String::new();
    for (index, item) in items.iter().enumerate() {
        let segment = if index == 0 {
            format!(
                "{total_quantity}^*{}*{}{SEGMENT_TERMINATOR}",
                item.code(),
                item.quantity()
            )
        } else {
            format!(
                "{SEGMENT_SEPARATOR}*{}*{}{SEGMENT_TERMINATOR}",
                item.code(),
                item.quantity()
            )
        };
        content.push_str(&segment);
    }
    content
}

// Length of `medical_content(total_quantity, items)` without rendering it.
fn medical_content_len(total_quantity: u64, items: &[&MedicalBenefitItem]) -> usize {
    items.iter().enumerate().fold(0usize, |len, (index, item)| {
        // `{total}^` on the first segment, `|` on the others.
        let lead = if index == 0 {
            decimal_len(total_quantity) + 1
        } else {
            SEGMENT_SEPARATOR.len()
        };
        let segment = lead
            + 1
            + item.code().as_str().len()
            + 1
            + decimal_len(u64::from(item.quantity().get()))
            + SEGMENT_TERMINATOR.len();
        len.saturating_add(segment)
    })
}

fn decimal_len(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

/// Cut `content` into consecutive slices of at most `max_len` characters.
///
/// For each window the cut moves back to just after the last `**` that *starts* at or before
/// the window end. If that terminator does not fit entirely inside the window (it straddles or
/// starts on the boundary) or there is none, the window is cut at the raw limit; the backend
/// accepts raw cuts. Concatenating the slices always reproduces `content`.
pub fn split_into_params(content: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < content.len() {
        let mut end = floor_char_boundary(content, (start + max_len).min(content.len()));
        if end <= start {
            // A single character wider than the window; emit it whole.
            end = content[start..]
                .chars()
                .next()
                .map_or(content.len(), |c| start + c.len_utf8());
        }

        let search_end = floor_char_boundary(
            content,
            (end + SEGMENT_TERMINATOR.len()).min(content.len()),
        );
        if let Some(found) = content[start..search_end].rfind(SEGMENT_TERMINATOR) {
            let terminator_end = start + found + SEGMENT_TERMINATOR.len();
            if terminator_end <= end {
                end = terminator_end;
            }
        }

        chunks.push(&content[start..end]);
        start = end;
    }

    chunks
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

//! Billable units and their HL7 fragments.

use serde::{Deserialize, Serialize};
use std::fmt;

use dental::DentalBenefit;
use hl7_types::{BenefitCode, Quantity};

use crate::BenefitResult;

/// One medical benefit type and how many of it are billed.
///
/// Wire form on its own: `{qty}^*{code}*{qty}**`, e.g. `7^*654321*7**`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MedicalBenefitItem {
    quantity: Quantity,
    code: BenefitCode,
    value: String,
}

impl MedicalBenefitItem {
    pub fn new(quantity: Quantity, code: BenefitCode) -> Self {
        let value = format!("{quantity}^*{code}*{quantity}**");
        Self {
            quantity,
            code,
            value,
        }
    }

    /// Build from raw editor input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BenefitError::Code`] if `quantity` is outside `1..=99` or `code` is not
    /// exactly six digits.
    pub fn of(quantity: u32, code: &str) -> BenefitResult<Self> {
        Ok(Self::new(Quantity::new(quantity)?, BenefitCode::new(code)?))
    }

    /// A copy of this item with a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> BenefitResult<Self> {
        Ok(Self::new(Quantity::new(quantity)?, self.code.clone()))
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn code(&self) -> &BenefitCode {
        &self.code
    }

    /// Medical items carry no position of their own; the encoder orders them as given.
    pub fn order(&self) -> u32 {
        0
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Which family a benefit belongs to. A submission is all one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitKind {
    Medical,
    Dental,
}

/// A billable unit: medical or dental.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BenefitItem {
    Medical(MedicalBenefitItem),
    Dental(DentalBenefit),
}

impl BenefitItem {
    /// Build a dental item from raw editor input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BenefitError::Dental`] for an unknown FDI number or surface letter, a
    /// non-numeric code, or a piece/surface combination the matrix rejects.
    pub fn dental(fdi: Option<u8>, surface_codes: &str, code: &str) -> BenefitResult<Self> {
        Ok(BenefitItem::Dental(DentalBenefit::parse(
            fdi,
            surface_codes,
            code,
        )?))
    }

    pub fn kind(&self) -> BenefitKind {
        match self {
            BenefitItem::Medical(_) => BenefitKind::Medical,
            BenefitItem::Dental(_) => BenefitKind::Dental,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            BenefitItem::Medical(item) => item.order(),
            BenefitItem::Dental(item) => item.order(),
        }
    }

    /// The item's own HL7 fragment, without any parameter name.
    pub fn value(&self) -> &str {
        match self {
            BenefitItem::Medical(item) => item.value(),
            BenefitItem::Dental(item) => item.value(),
        }
    }

    pub fn len(&self) -> usize {
        self.value().len()
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

impl From<MedicalBenefitItem> for BenefitItem {
    fn from(item: MedicalBenefitItem) -> Self {
        BenefitItem::Medical(item)
    }
}

impl From<DentalBenefit> for BenefitItem {
    fn from(item: DentalBenefit) -> Self {
        BenefitItem::Dental(item)
    }
}

impl fmt::Display for BenefitItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// HL7 message type of a submission (`tipo_mensaje`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "D")]
    Odontologia,
    #[serde(rename = "O")]
    Medicina,
}

impl MessageType {
    pub fn code(self) -> &'static str {
        match self {
            MessageType::Odontologia => "D",
            MessageType::Medicina => "O",
        }
    }

    /// Dental when the list holds a dental benefit, medical otherwise (including empty lists).
    pub fn for_benefits(benefits: &[BenefitItem]) -> Self {
        if benefits.iter().any(|b| b.kind() == BenefitKind::Dental) {
            MessageType::Odontologia
        } else {
            MessageType::Medicina
        }
    }
}

//! Response wire models.
//!
//! The backend adds fields over time, so unknown keys are ignored and every field is optional.
//! A header rejection code (`rechaCabecera`) greater than zero means the whole call was
//! rejected; a detail rejection code (`recha`) greater than zero rejects that line only.

use serde::{Deserialize, Serialize};

// ============================================================================
// Classification seams
// ============================================================================

/// Header-level rejection fields shared by every response.
pub trait RejectionStatus {
    fn rejection_code(&self) -> Option<i32>;
    fn rejection_description(&self) -> Option<&str>;
}

/// A response made of a header and detail lines.
pub trait HeaderedResponse {
    type Header: RejectionStatus;

    fn header(&self) -> Option<&Self::Header>;
    fn detail_lines(&self) -> &[DetailLine];
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default)]
    pub cabecera: Option<RegistrationHeader>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detalle: Vec<DetailLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationHeader {
    pub transac_alta: Option<String>,
    pub transac: Option<i64>,
    pub recha_cabecera: Option<i32>,
    pub recha_cabe_deno: Option<String>,
    pub ape_nom: Option<String>,
    pub gravado: Option<String>,
    pub plan_codi: Option<String>,
    pub pmi: Option<String>,
    pub sexo: Option<String>,
    pub sexo_auto: Option<String>,
    pub genero_auto: Option<String>,
    pub edad: Option<i32>,
    pub leyimp: Option<String>,
    pub icd_deno: Option<String>,
    pub nom_prestad: Option<String>,
    pub sucursal: Option<String>,
    pub autoriz: Option<i32>,
}

/// One line of a registration or cancellation detail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailLine {
    pub transac: Option<i64>,
    pub recha: Option<i32>,
    pub deno_item: Option<String>,
}

impl RejectionStatus for RegistrationHeader {
    fn rejection_code(&self) -> Option<i32> {
        self.recha_cabecera
    }

    fn rejection_description(&self) -> Option<&str> {
        self.recha_cabe_deno.as_deref()
    }
}

impl HeaderedResponse for RegistrationResponse {
    type Header = RegistrationHeader;

    fn header(&self) -> Option<&RegistrationHeader> {
        self.cabecera.as_ref()
    }

    fn detail_lines(&self) -> &[DetailLine] {
        &self.detalle
    }
}

// ============================================================================
// Cancellation
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationResponse {
    #[serde(default)]
    pub cabecera: Option<CancellationHeader>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detalle: Vec<DetailLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationHeader {
    pub transac_alta: Option<String>,
    pub transac: Option<i64>,
    pub recha_cabecera: Option<i32>,
    pub recha_cabe_deno: Option<String>,
    pub ape_nom: Option<String>,
    pub gravado: Option<String>,
    pub plan_codi: Option<String>,
    pub pmi: Option<String>,
    pub sexo: Option<String>,
    pub edad: Option<i32>,
    pub leyimp: Option<String>,
}

impl RejectionStatus for CancellationHeader {
    fn rejection_code(&self) -> Option<i32> {
        self.recha_cabecera
    }

    fn rejection_description(&self) -> Option<&str> {
        self.recha_cabe_deno.as_deref()
    }
}

impl HeaderedResponse for CancellationResponse {
    type Header = CancellationHeader;

    fn header(&self) -> Option<&CancellationHeader> {
        self.cabecera.as_ref()
    }

    fn detail_lines(&self) -> &[DetailLine] {
        &self.detalle
    }
}

// ============================================================================
// Eligibility
// ============================================================================

/// Eligibility answer. Flat: the header fields sit at the top level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub plan_codi: Option<String>,
    pub sexo_auto: Option<String>,
    pub genero_auto: Option<String>,
    pub ape_nom: Option<String>,
    pub transac_alta: Option<String>,
    pub pmi: Option<String>,
    pub edad: Option<i32>,
    pub transac: Option<String>,
    pub recha_cabecera: Option<i32>,
    pub icd_deno: Option<String>,
    pub gravado: Option<String>,
    pub recha_cabe_deno: Option<String>,
    pub sexo: Option<String>,
    pub leyimp: Option<String>,
}

impl RejectionStatus for EligibilityResponse {
    fn rejection_code(&self) -> Option<i32> {
        self.recha_cabecera
    }

    fn rejection_description(&self) -> Option<&str> {
        self.recha_cabe_deno.as_deref()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DetailLine>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<DetailLine>>::deserialize(deserializer)?.unwrap_or_default())
}

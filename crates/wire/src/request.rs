//! Request wire models.
//!
//! Field names follow the backend's stored procedure parameters (`@ticket_ext` becomes
//! `ticketExt` on the wire). Absent optional fields are omitted from the JSON rather than sent
//! as `null`; dates travel as `YYYYMMDD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hl7_core::{
    BenefitItem, BenefitParams, BenefitRequestMapper, EncoderConfig, MessageType,
};

use crate::WireResult;

// ============================================================================
// Shared field types
// ============================================================================

/// `modo`: how the transaction is processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestMode {
    #[default]
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "U")]
    Urgencia,
}

/// `manual` / `consulta`: how the affiliate was identified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualMode {
    #[serde(rename = "0")]
    Manual,
    #[serde(rename = "C")]
    Capitador,
    #[serde(rename = "L")]
    Consulta,
}

/// Value sent in `param1` of a cancellation that carries no benefits.
pub const CANCELLATION_EMPTY_PARAM: &str = "0";

// ============================================================================
// Registration
// ============================================================================

/// Benefit registration (`registracion`) request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modo: Option<RequestMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creden: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<i32>,
    #[serde(default, with = "hl7_date", skip_serializing_if = "Option::is_none")]
    pub alta: Option<NaiveDate>,
    #[serde(default, with = "hl7_date", skip_serializing_if = "Option::is_none")]
    pub fecdif: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consulta: Option<ManualMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_ext: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inter_nro: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ori_matri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoriz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recha_ext: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd: Option<String>,
    #[serde(default)]
    pub param1: String,
    #[serde(default)]
    pub param2: String,
    #[serde(default)]
    pub param3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_efector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_efector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_prescr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_prescr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ackacept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ackackapl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_mensaje: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_builder: Option<bool>,
}

impl RegistrationRequest {
    /// Encode `benefits` into `param1..param3` and set `tipoMensaje` to match.
    ///
    /// On error the request is left untouched.
    pub fn apply_benefits(&mut self, benefits: &[BenefitItem]) -> WireResult<()> {
        self.apply_benefits_with(&BenefitRequestMapper::default(), benefits)
    }

    /// As [`RegistrationRequest::apply_benefits`], with an explicitly configured mapper.
    pub fn apply_benefits_with(
        &mut self,
        mapper: &BenefitRequestMapper,
        benefits: &[BenefitItem],
    ) -> WireResult<()> {
        let BenefitParams {
            param1,
            param2,
            param3,
        } = mapper.apply(benefits)?;

        self.param1 = param1;
        self.param2 = param2;
        self.param3 = param3;
        self.tipo_mensaje = Some(MessageType::for_benefits(benefits));
        Ok(())
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Benefit cancellation (`cancelacion`) request. Only two parameter slots exist here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modo: Option<RequestMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creden: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<i32>,
    #[serde(default, with = "hl7_date", skip_serializing_if = "Option::is_none")]
    pub alta: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_ext: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_cab: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_modo: Option<RequestMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_ext: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inter_nro: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuit: Option<u64>,
    #[serde(default)]
    pub param1: String,
    #[serde(default)]
    pub param2: String,
}

impl CancellationRequest {
    /// Encode `benefits` into `param1`/`param2` under the two-slot budget.
    ///
    /// An empty list sends `param1 = "0"`, which is what the cancellation procedure expects
    /// when no benefits are cancelled. On error the request is left untouched.
    pub fn apply_benefits(&mut self, benefits: &[BenefitItem]) -> WireResult<()> {
        if benefits.is_empty() {
            self.param1 = CANCELLATION_EMPTY_PARAM.to_string();
            self.param2 = String::new();
            return Ok(());
        }

        let params =
            BenefitRequestMapper::new(EncoderConfig::cancellation()).apply(benefits)?;
        self.param1 = if params.param1.is_empty() {
            CANCELLATION_EMPTY_PARAM.to_string()
        } else {
            params.param1
        };
        self.param2 = params.param2;
        Ok(())
    }
}

// ============================================================================
// Eligibility
// ============================================================================

/// Affiliate eligibility (`elegibilidad`) request. Carries no benefits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modo: Option<RequestMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creden: Option<String>,
    #[serde(default, with = "hl7_date", skip_serializing_if = "Option::is_none")]
    pub alta: Option<NaiveDate>,
    #[serde(default, with = "hl7_date", skip_serializing_if = "Option::is_none")]
    pub fecdif: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_ext: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inter_nro: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ori_matri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoriz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recha_ext: Option<i32>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// `Option<NaiveDate>` as `YYYYMMDD`. An empty string reads back as `None`.
mod hl7_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y%m%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WireError;
    use hl7_core::{BenefitError, DentalBenefit, MedicalBenefitItem};

    fn medical(qty: u32, code: &str) -> BenefitItem {
        MedicalBenefitItem::of(qty, code).expect("valid item").into()
    }

    #[test]
    fn registration_serializes_camel_case_and_omits_absent_fields() {
        let mut request = RegistrationRequest {
            modo: Some(RequestMode::Normal),
            creden: Some("7180171001151".into()),
            alta: NaiveDate::from_ymd_opt(2025, 3, 7),
            manual: Some(ManualMode::Manual),
            ticket_ext: Some(0),
            ..Default::default()
        };
        request
            .apply_benefits(&[medical(2, "660001")])
            .expect("valid benefits");

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["modo"], "N");
        assert_eq!(json["alta"], "20250307");
        assert_eq!(json["manual"], "0");
        assert_eq!(json["ticketExt"], 0);
        assert_eq!(json["param1"], "2^*660001*2**");
        assert_eq!(json["param2"], "");
        assert_eq!(json["tipoMensaje"], "O");
        assert!(json.get("fecdif").is_none());
        assert!(json.get("powerBuilder").is_none());
    }

    #[test]
    fn registration_dental_sets_message_type() {
        let mut request = RegistrationRequest::default();
        let dental: BenefitItem = DentalBenefit::parse(Some(26), "OM", "020801")
            .expect("valid dental")
            .into();
        request.apply_benefits(&[dental]).expect("valid benefits");
        assert_eq!(request.param1, "1^*26*OM*O020801*P*1**");
        assert_eq!(request.tipo_mensaje, Some(MessageType::Odontologia));
    }

    #[test]
    fn registration_without_benefits_sends_sentinel() {
        let mut request = RegistrationRequest::default();
        request.apply_benefits(&[]).expect("empty is valid");
        assert_eq!(request.param1, "0^*0*0**");
        assert_eq!(request.param2, "");
        assert_eq!(request.param3, "");
    }

    #[test]
    fn failed_encoding_leaves_request_untouched() {
        let mut request = RegistrationRequest {
            param1: "previous".into(),
            ..Default::default()
        };
        let dental: BenefitItem = DentalBenefit::parse(Some(26), "O", "020801")
            .expect("valid dental")
            .into();
        let err = request
            .apply_benefits(&[dental, medical(1, "660001")])
            .expect_err("mixed kinds");
        assert!(matches!(err, WireError::Benefit(BenefitError::MixedKinds)));
        assert_eq!(request.param1, "previous");
        assert_eq!(request.tipo_mensaje, None);
    }

    #[test]
    fn cancellation_without_benefits_sends_zero() {
        let mut request = CancellationRequest::default();
        request.apply_benefits(&[]).expect("empty is valid");
        assert_eq!(request.param1, "0");
        assert_eq!(request.param2, "");

        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("param3").is_none());
    }

    #[test]
    fn cancellation_encodes_medical_benefits() {
        let mut request = CancellationRequest {
            cancel_modo: Some(RequestMode::Normal),
            ..Default::default()
        };
        request
            .apply_benefits(&[medical(1, "660001"), medical(1, "660002")])
            .expect("valid benefits");
        assert_eq!(request.param1, "2^*660001*1**|*660002*1**");
        assert_eq!(request.param2, "");

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["cancelModo"], "N");
    }

    #[test]
    fn cancellation_rejects_content_over_two_slots() {
        let items: Vec<BenefitItem> = (0..45)
            .map(|i| medical(10, &format!("{:06}", 660_000 + i)))
            .collect();
        let mut request = CancellationRequest::default();
        let err = request.apply_benefits(&items).expect_err("over 510 characters");
        assert!(matches!(
            err,
            WireError::Benefit(BenefitError::MedicalTooLong { max: 510, .. })
        ));
        assert_eq!(request.param1, "");
    }

    #[test]
    fn dates_read_back_from_wire_format() {
        let request: EligibilityRequest =
            serde_json::from_str(r#"{"creden":"1","alta":"20240229","fecdif":""}"#)
                .expect("deserialize");
        assert_eq!(request.alta, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(request.fecdif, None);

        let err = serde_json::from_str::<EligibilityRequest>(r#"{"alta":"2024-02-29"}"#);
        assert!(err.is_err());
    }
}

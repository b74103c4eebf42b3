//! Turn a raw HTTP status and body into an [`Hl7Result`].
//!
//! Rules, applied in order:
//! 1. status outside `200..=299`: technical error, origin `TRANSPORTE`;
//! 2. blank body, unparseable body, or a header-based response without a header: technical
//!    error, origin `PARSEO`;
//! 3. header rejection code `> 0`: `REJECTED`, keeping the parsed response;
//! 4. detail lines with rejection code `> 0`: `PARTIAL` with one item error per line;
//! 5. otherwise `OK`.

use hl7_core::{Hl7Error, Hl7ErrorOrigin, Hl7ItemError, Hl7ItemErrorOrigin, Hl7Result};
use serde::de::DeserializeOwned;

use crate::parse_json;
use crate::response::{
    CancellationResponse, EligibilityResponse, HeaderedResponse, RegistrationResponse,
    RejectionStatus,
};

const INVALID_RESPONSE: &str = "invalid HL7 response";
const PROCESSING_FAILED: &str = "technical error processing HL7 response";

pub fn classify_registration(status: u16, body: &str) -> Hl7Result<RegistrationResponse> {
    classify_headered("registration", status, body)
}

pub fn classify_cancellation(status: u16, body: &str) -> Hl7Result<CancellationResponse> {
    classify_headered("cancellation", status, body)
}

pub fn classify_eligibility(status: u16, body: &str) -> Hl7Result<EligibilityResponse> {
    let response = match parse_body::<EligibilityResponse>("eligibility", status, body) {
        Ok(response) => response,
        Err(error) => return Hl7Result::error(error),
    };

    let result = match header_rejection(&response) {
        Some(error) => Hl7Result::rejected(Some(response), error),
        None => Hl7Result::ok(response),
    };
    tracing::debug!(operation = "eligibility", status = %result.status(), "classified HL7 response");
    result
}

/// Outcome for a caller that has no authenticated session; nothing is sent.
pub fn classify_unauthenticated<T>() -> Hl7Result<T> {
    Hl7Result::error(Hl7Error::session_expired())
}

fn classify_headered<R>(operation: &str, status: u16, body: &str) -> Hl7Result<R>
where
    R: HeaderedResponse + DeserializeOwned,
{
    let response = match parse_body::<R>(operation, status, body) {
        Ok(response) => response,
        Err(error) => return Hl7Result::error(error),
    };

    let Some(header) = response.header() else {
        tracing::warn!(operation, "HL7 response has no header");
        return Hl7Result::error(invalid_response());
    };

    if let Some(error) = header_rejection(header) {
        tracing::debug!(operation, code = ?error.code(), "HL7 header rejection");
        return Hl7Result::rejected(Some(response), error);
    }

    let item_errors: Vec<Hl7ItemError> = response
        .detail_lines()
        .iter()
        .filter_map(|line| match line.recha {
            Some(code) if code > 0 => Some(Hl7ItemError::new(
                code.to_string(),
                line.deno_item.clone().unwrap_or_default(),
                Hl7ItemErrorOrigin::Detalle,
            )),
            _ => None,
        })
        .collect();

    let result = if item_errors.is_empty() {
        Hl7Result::ok(response)
    } else {
        Hl7Result::partial(response, item_errors)
    };
    tracing::debug!(operation, status = %result.status(), "classified HL7 response");
    result
}

fn parse_body<T>(operation: &str, status: u16, body: &str) -> Result<T, Hl7Error>
where
    T: DeserializeOwned,
{
    if !(200..=299).contains(&status) {
        tracing::warn!(operation, status, "HL7 server answered with a non-success status");
        return Err(Hl7Error::technical(
            format!("HL7 server technical error (HTTP {status})"),
            Hl7ErrorOrigin::Transporte,
        ));
    }

    if body.trim().is_empty() {
        tracing::warn!(operation, "HL7 server answered with an empty body");
        return Err(invalid_response());
    }

    parse_json(operation, body).map_err(|err| {
        tracing::warn!(operation, error = %err, "HL7 response does not match the wire schema");
        Hl7Error::technical(PROCESSING_FAILED, Hl7ErrorOrigin::Parseo)
    })
}

fn header_rejection(header: &impl RejectionStatus) -> Option<Hl7Error> {
    let code = header.rejection_code().filter(|code| *code > 0)?;
    let message = match header.rejection_description().map(str::trim) {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => format!("rejected by the HL7 server (code {code})"),
    };
    Some(Hl7Error::functional(code.to_string(), message))
}

fn invalid_response() -> Hl7Error {
    Hl7Error::technical(INVALID_RESPONSE, Hl7ErrorOrigin::Parseo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_core::Hl7Status;

    const OK_REGISTRATION: &str = r#"{
        "cabecera": {"transac": 12345, "rechaCabecera": 0, "apeNom": "DOE JOHN", "extra": true},
        "detalle": [{"transac": 12345, "recha": 0, "denoItem": "ok"}]
    }"#;

    #[test]
    fn non_success_status_is_a_transport_error() {
        let result = classify_registration(503, OK_REGISTRATION);
        let error = result.issue().expect("error has an issue");
        assert!(result.is_error());
        assert_eq!(error.origin(), Hl7ErrorOrigin::Transporte);
        assert!(error.message().contains("503"));
        assert!(classify_registration(199, OK_REGISTRATION).is_error());
        assert!(classify_registration(300, OK_REGISTRATION).is_error());
    }

    #[test]
    fn blank_body_is_invalid() {
        let result = classify_cancellation(200, "  \n");
        let error = result.issue().expect("error has an issue");
        assert_eq!(error.origin(), Hl7ErrorOrigin::Parseo);
        assert_eq!(error.message(), "invalid HL7 response");
    }

    #[test]
    fn unparseable_body_is_a_parse_error() {
        for body in ["not json", "null", r#"{"cabecera": {"rechaCabecera": "x"}}"#] {
            let result = classify_registration(200, body);
            assert!(result.is_error(), "body {body}");
            assert_eq!(
                result.issue().map(Hl7Error::origin),
                Some(Hl7ErrorOrigin::Parseo)
            );
        }
    }

    #[test]
    fn missing_header_is_invalid() {
        let result = classify_registration(200, r#"{"detalle": []}"#);
        assert_eq!(
            result.issue().map(Hl7Error::message),
            Some("invalid HL7 response")
        );
    }

    #[test]
    fn clean_registration_is_ok() {
        let result = classify_registration(200, OK_REGISTRATION);
        assert_eq!(result.status(), Hl7Status::Ok);
        let data = result.data().expect("ok has data");
        assert_eq!(
            data.cabecera.as_ref().and_then(|c| c.ape_nom.as_deref()),
            Some("DOE JOHN")
        );
    }

    #[test]
    fn header_rejection_keeps_the_response() {
        let body = r#"{"cabecera": {"rechaCabecera": 5, "rechaCabeDeno": "AFFILIATE NOT FOUND"}}"#;
        let result = classify_registration(200, body);
        assert!(result.is_rejected());
        assert!(result.data().is_some());
        let error = result.issue().expect("rejection has an issue");
        assert_eq!(error.code(), Some("5"));
        assert_eq!(error.message(), "AFFILIATE NOT FOUND");
        assert_eq!(error.origin(), Hl7ErrorOrigin::Cabecera);
    }

    #[test]
    fn header_rejection_without_description_gets_a_message() {
        let result = classify_cancellation(200, r#"{"cabecera": {"rechaCabecera": 7}}"#);
        assert_eq!(
            result.issue().map(Hl7Error::message),
            Some("rejected by the HL7 server (code 7)")
        );
    }

    #[test]
    fn rejected_detail_lines_make_a_partial_result() {
        let body = r#"{
            "cabecera": {"transac": 1, "rechaCabecera": 0},
            "detalle": [
                {"recha": 0, "denoItem": "accepted"},
                {"recha": 12, "denoItem": "benefit not covered"},
                {"recha": 40, "denoItem": "quantity exceeded"}
            ]
        }"#;
        let result = classify_cancellation(200, body);
        assert!(result.is_partial());
        let items = result.item_errors();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].code(), "12");
        assert_eq!(items[0].message(), "benefit not covered");
        assert_eq!(items[1].origin(), Hl7ItemErrorOrigin::Detalle);
    }

    #[test]
    fn null_detail_is_treated_as_empty() {
        let result = classify_registration(200, r#"{"cabecera": {}, "detalle": null}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn eligibility_is_flat() {
        let ok = classify_eligibility(200, r#"{"apeNom": "DOE JOHN", "rechaCabecera": 0}"#);
        assert!(ok.is_ok());

        let rejected = classify_eligibility(
            200,
            r#"{"rechaCabecera": 3, "rechaCabeDeno": "PLAN SUSPENDED"}"#,
        );
        assert!(rejected.is_rejected());
        assert_eq!(rejected.issue().and_then(Hl7Error::code), Some("3"));
    }

    #[test]
    fn unauthenticated_callers_get_session_expired() {
        let result: Hl7Result<RegistrationResponse> = classify_unauthenticated();
        let error = result.issue().expect("error has an issue");
        assert!(error.is_session());
        assert_eq!(error.origin(), Hl7ErrorOrigin::Transporte);
    }
}

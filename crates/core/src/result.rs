//! Outcome of a remote HL7 call.
//!
//! [`Hl7Result`] is a closed sum over the four outcomes the backend can produce. Consumers
//! `match` on it; there is no "unknown" status to fall through to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a call-level error was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hl7ErrorOrigin {
    /// Rejection reported in the response header.
    Cabecera,
    /// Transport failure, including an expired session.
    Transporte,
    /// The response could not be understood.
    Parseo,
}

/// Where a line-item error was reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hl7ItemErrorOrigin {
    Detalle,
    Subdetalle,
}

/// Status tag of an [`Hl7Result`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hl7Status {
    Ok,
    Partial,
    Rejected,
    Error,
}

impl Hl7Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Hl7Status::Ok => "OK",
            Hl7Status::Partial => "PARTIAL",
            Hl7Status::Rejected => "REJECTED",
            Hl7Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Hl7Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call-level error: a functional rejection or a technical failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Hl7Error {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    message: String,
    origin: Hl7ErrorOrigin,
    session: bool,
}

impl Hl7Error {
    /// Code used by [`Hl7Error::session_expired`].
    pub const SESSION_EXPIRED_CODE: &'static str = "SESSION_EXPIRED";

    /// A business-rule rejection reported by the backend header.
    pub fn functional(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            origin: Hl7ErrorOrigin::Cabecera,
            session: false,
        }
    }

    /// An infrastructure failure. Technical errors carry no business code.
    pub fn technical(message: impl Into<String>, origin: Hl7ErrorOrigin) -> Self {
        Self {
            code: None,
            message: message.into(),
            origin,
            session: false,
        }
    }

    pub fn session_expired() -> Self {
        Self {
            code: Some(Self::SESSION_EXPIRED_CODE.to_string()),
            message: "the session has expired".to_string(),
            origin: Hl7ErrorOrigin::Transporte,
            session: true,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Hl7ErrorOrigin {
        self.origin
    }

    pub fn is_session(&self) -> bool {
        self.session
    }
}

/// One rejected line item inside an otherwise successful response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hl7ItemError {
    code: String,
    message: String,
    origin: Hl7ItemErrorOrigin,
}

impl Hl7ItemError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        origin: Hl7ItemErrorOrigin,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            origin,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Hl7ItemErrorOrigin {
        self.origin
    }
}

impl fmt::Display for Hl7ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Outcome of a remote call carrying a payload of type `T`.
///
/// - `Ok`: success, payload present.
/// - `Partial`: success with rejected line items; payload and item errors are both kept.
/// - `Rejected`: functional rejection; the payload is kept when the backend sent one.
/// - `Error`: technical failure (transport, parsing or session); never carries a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hl7Result<T> {
    Ok {
        data: T,
    },
    Partial {
        data: T,
        item_errors: Vec<Hl7ItemError>,
    },
    Rejected {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<T>,
        error: Hl7Error,
    },
    Error {
        error: Hl7Error,
    },
}

impl<T> Hl7Result<T> {
    pub fn ok(data: T) -> Self {
        Hl7Result::Ok { data }
    }

    pub fn partial(data: T, item_errors: Vec<Hl7ItemError>) -> Self {
        Hl7Result::Partial { data, item_errors }
    }

    pub fn rejected(data: Option<T>, error: Hl7Error) -> Self {
        Hl7Result::Rejected { data, error }
    }

    pub fn error(error: Hl7Error) -> Self {
        Hl7Result::Error { error }
    }

    pub fn status(&self) -> Hl7Status {
        match self {
            Hl7Result::Ok { .. } => Hl7Status::Ok,
            Hl7Result::Partial { .. } => Hl7Status::Partial,
            Hl7Result::Rejected { .. } => Hl7Status::Rejected,
            Hl7Result::Error { .. } => Hl7Status::Error,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Hl7Result::Ok { .. })
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Hl7Result::Partial { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Hl7Result::Rejected { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Hl7Result::Error { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Hl7Result::Ok { data } | Hl7Result::Partial { data, .. } => Some(data),
            Hl7Result::Rejected { data, .. } => data.as_ref(),
            Hl7Result::Error { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Hl7Result::Ok { data } | Hl7Result::Partial { data, .. } => Some(data),
            Hl7Result::Rejected { data, .. } => data,
            Hl7Result::Error { .. } => None,
        }
    }

    /// The call-level error of a rejected or failed call.
    pub fn issue(&self) -> Option<&Hl7Error> {
        match self {
            Hl7Result::Rejected { error, .. } | Hl7Result::Error { error } => Some(error),
            Hl7Result::Ok { .. } | Hl7Result::Partial { .. } => None,
        }
    }

    /// Line-item errors; empty unless the result is partial.
    pub fn item_errors(&self) -> &[Hl7ItemError] {
        match self {
            Hl7Result::Partial { item_errors, .. } => item_errors,
            _ => &[],
        }
    }

    /// Transform the payload, keeping the status and errors.
    pub fn map<U, F>(self, f: F) -> Hl7Result<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Hl7Result::Ok { data } => Hl7Result::Ok { data: f(data) },
            Hl7Result::Partial { data, item_errors } => Hl7Result::Partial {
                data: f(data),
                item_errors,
            },
            Hl7Result::Rejected { data, error } => Hl7Result::Rejected {
                data: data.map(f),
                error,
            },
            Hl7Result::Error { error } => Hl7Result::Error { error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str) -> Hl7ItemError {
        Hl7ItemError::new(code, format!("item {code} rejected"), Hl7ItemErrorOrigin::Detalle)
    }

    #[test]
    fn ok_carries_data_and_nothing_else() {
        let result = Hl7Result::ok(7);
        assert!(result.is_ok());
        assert_eq!(result.status(), Hl7Status::Ok);
        assert_eq!(result.data(), Some(&7));
        assert!(result.issue().is_none());
        assert!(result.item_errors().is_empty());
    }

    #[test]
    fn partial_keeps_data_and_item_errors() {
        let result = Hl7Result::partial("payload", vec![item("12"), item("40")]);
        assert!(result.is_partial());
        assert_eq!(result.data(), Some(&"payload"));
        assert_eq!(result.item_errors().len(), 2);
        assert_eq!(result.item_errors()[0].to_string(), "item 12 rejected (12)");
        assert!(result.issue().is_none());
    }

    #[test]
    fn rejected_data_is_optional() {
        let error = Hl7Error::functional("5", "affiliate not found");
        let with_data = Hl7Result::rejected(Some(1), error.clone());
        let without = Hl7Result::<i32>::rejected(None, error);

        assert!(with_data.is_rejected());
        assert_eq!(with_data.data(), Some(&1));
        assert_eq!(without.data(), None);
        assert_eq!(without.issue().and_then(Hl7Error::code), Some("5"));
        assert_eq!(
            without.issue().map(Hl7Error::origin),
            Some(Hl7ErrorOrigin::Cabecera)
        );
    }

    #[test]
    fn error_never_has_data() {
        let result: Hl7Result<i32> = Hl7Result::error(Hl7Error::technical(
            "connection refused",
            Hl7ErrorOrigin::Transporte,
        ));
        assert!(result.is_error());
        assert_eq!(result.data(), None);
        assert_eq!(result.clone().into_data(), None);
        let issue = result.issue().expect("error has an issue");
        assert_eq!(issue.code(), None);
        assert!(!issue.is_session());
        assert_eq!(issue.to_string(), "connection refused");
    }

    #[test]
    fn session_expired_is_flagged() {
        let error = Hl7Error::session_expired();
        assert!(error.is_session());
        assert_eq!(error.code(), Some("SESSION_EXPIRED"));
        assert_eq!(error.origin(), Hl7ErrorOrigin::Transporte);
    }

    #[test]
    fn map_keeps_status_and_errors() {
        let partial = Hl7Result::partial(2, vec![item("1")]).map(|n| n * 10);
        assert_eq!(partial, Hl7Result::partial(20, vec![item("1")]));

        let rejected =
            Hl7Result::rejected(Some(2), Hl7Error::functional("9", "no")).map(|n| n.to_string());
        assert_eq!(rejected.data().map(String::as_str), Some("2"));

        let failed: Hl7Result<String> =
            Hl7Result::<i32>::error(Hl7Error::session_expired()).map(|n| n.to_string());
        assert!(failed.is_error());
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Hl7Result::partial(1, vec![item("3")])).expect("serialize");
        assert_eq!(json["status"], "PARTIAL");
        assert_eq!(json["data"], 1);
        assert_eq!(json["item_errors"][0]["origin"], "DETALLE");

        let json = serde_json::to_value(Hl7Result::<i32>::rejected(
            None,
            Hl7Error::functional("5", "denied"),
        ))
        .expect("serialize");
        assert_eq!(json["status"], "REJECTED");
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["origin"], "CABECERA");

        let back: Hl7Result<i32> = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.data(), None);
        assert!(back.is_rejected());
    }
}

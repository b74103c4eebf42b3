//! What a user is shown for an [`Hl7Result`].

use serde::Serialize;

use crate::result::{Hl7Error, Hl7ItemError, Hl7Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A rendered outcome: a dialog title and body, plus whether the user must log in again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub requires_reauthentication: bool,
}

impl<T> Hl7Result<T> {
    /// Render this outcome for the operation named `context` (e.g. "registration").
    ///
    /// Successful results produce no report. `transaction` is appended to every report except
    /// session expiry.
    pub fn report(&self, context: &str, transaction: Option<&str>) -> Option<OutcomeReport> {
        match self {
            Hl7Result::Ok { .. } => None,
            Hl7Result::Partial { item_errors, .. } => {
                let mut message = String::from("The operation completed with observations.");
                append_item_errors(&mut message, item_errors);
                append_transaction(&mut message, transaction);
                Some(OutcomeReport {
                    severity: Severity::Warning,
                    title: format!("Partial result of {context}"),
                    message,
                    requires_reauthentication: false,
                })
            }
            Hl7Result::Rejected { error, .. } => {
                Some(rejection_report(error, context, transaction))
            }
            Hl7Result::Error { error } if error.is_session() => Some(OutcomeReport {
                severity: Severity::Warning,
                title: "Session expired".to_string(),
                message: error.message().to_string(),
                requires_reauthentication: true,
            }),
            Hl7Result::Error { error } => {
                let mut message = error.message().to_string();
                if message.trim().is_empty() {
                    message = format!("Technical error while calling {context}");
                }
                append_transaction(&mut message, transaction);
                Some(OutcomeReport {
                    severity: Severity::Error,
                    title: "Technical error".to_string(),
                    message,
                    requires_reauthentication: false,
                })
            }
        }
    }
}

fn rejection_report(
    error: &Hl7Error,
    context: &str,
    transaction: Option<&str>,
) -> OutcomeReport {
    let mut message = error.message().to_string();
    if let Some(code) = error.code().filter(|c| !c.is_empty()) {
        message.push_str(&format!("\n\nCode: {code}"));
    }
    append_transaction(&mut message, transaction);

    OutcomeReport {
        severity: Severity::Warning,
        title: format!("Operation rejected - {context}"),
        message,
        requires_reauthentication: false,
    }
}

fn append_item_errors(message: &mut String, item_errors: &[Hl7ItemError]) {
    if item_errors.is_empty() {
        return;
    }
    message.push_str("\n\nDetails:");
    for item in item_errors {
        message.push_str(&format!("\n- {item}"));
    }
}

fn append_transaction(message: &mut String, transaction: Option<&str>) {
    if let Some(transaction) = transaction {
        message.push_str(&format!("\n\nTransaction: {transaction}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Hl7ErrorOrigin, Hl7ItemErrorOrigin};

    #[test]
    fn ok_has_no_report() {
        assert!(Hl7Result::ok(()).report("registration", Some("123")).is_none());
    }

    #[test]
    fn partial_lists_item_errors_and_transaction() {
        let result = Hl7Result::partial(
            (),
            vec![Hl7ItemError::new(
                "12",
                "benefit not covered",
                Hl7ItemErrorOrigin::Detalle,
            )],
        );
        let report = result
            .report("registration", Some("998877"))
            .expect("partial is reported");
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.title, "Partial result of registration");
        assert_eq!(
            report.message,
            "The operation completed with observations.\n\nDetails:\n- benefit not covered (12)\n\nTransaction: 998877"
        );
        assert!(!report.requires_reauthentication);
    }

    #[test]
    fn rejection_shows_code() {
        let result: Hl7Result<()> =
            Hl7Result::rejected(None, Hl7Error::functional("5", "affiliate not found"));
        let report = result.report("eligibility", None).expect("rejection is reported");
        assert_eq!(report.title, "Operation rejected - eligibility");
        assert_eq!(report.message, "affiliate not found\n\nCode: 5");
    }

    #[test]
    fn session_expiry_asks_for_login_without_transaction() {
        let result: Hl7Result<()> = Hl7Result::error(Hl7Error::session_expired());
        let report = result
            .report("cancellation", Some("1"))
            .expect("session expiry is reported");
        assert_eq!(report.title, "Session expired");
        assert!(report.requires_reauthentication);
        assert!(!report.message.contains("Transaction"));
    }

    #[test]
    fn technical_error_is_an_error() {
        let result: Hl7Result<()> =
            Hl7Result::error(Hl7Error::technical("HTTP 503", Hl7ErrorOrigin::Transporte));
        let report = result
            .report("registration", Some("42"))
            .expect("error is reported");
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.title, "Technical error");
        assert_eq!(report.message, "HTTP 503\n\nTransaction: 42");

        let blank: Hl7Result<()> =
            Hl7Result::error(Hl7Error::technical(" ", Hl7ErrorOrigin::Parseo));
        let report = blank.report("registration", None).expect("error is reported");
        assert_eq!(report.message, "Technical error while calling registration");
    }
}

//! Contact form: client-side checks, the JSON request body and the response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop a contact submission before it is sent.
#[derive(Error, Debug)]
pub enum ContactError {
    /// The hidden spam-trap field was filled in.
    #[error("Spam trap field was filled")]
    Honeypot,

    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The request body could not be encoded.
    #[error("Failed to encode contact message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where and how the form is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Endpoint receiving the JSON POST.
    pub endpoint: String,
    /// Submit button label while the request is in flight.
    pub sending_label: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/contact".into(),
            sending_label: "Sending...".into(),
        }
    }
}

impl ContactConfig {
    /// The endpoint must be set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::invalid("contact.endpoint", "must not be empty"));
        }
        Ok(())
    }
}

/// Raw form values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Hidden field that only bots fill in.
    pub honeypot: String,
}

impl ContactForm {
    /// Check the form and turn it into the request body.
    ///
    /// The honeypot is checked first, then the required fields in form order,
    /// matching the order the server reports them in.
    pub fn into_message(self) -> Result<ContactMessage, ContactError> {
        if !self.honeypot.is_empty() {
            return Err(ContactError::Honeypot);
        }

        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        Ok(ContactMessage {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        })
    }
}

/// JSON body posted to the contact endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactMessage {
    /// Encode as the request body.
    pub fn to_json(&self) -> Result<String, ContactError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body returned by the contact endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    /// Set on success.
    #[serde(default)]
    pub message: Option<String>,
    /// Set on failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// The two outcomes shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Show the success dialog and reset the form.
    Success,
    /// Show the generic error dialog.
    Failure,
}

impl SubmissionOutcome {
    /// Outcome for an HTTP status; any 2xx is a success.
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Whether the form should be reset.
    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Id of the dialog element to show.
    pub fn modal_id(self) -> &'static str {
        match self {
            Self::Success => "successModal",
            Self::Failure => "errorModal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Nice site".into(),
            honeypot: String::new(),
        }
    }

    #[test]
    fn test_valid_form_encodes_without_honeypot() {
        let json = filled().into_message().unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["message"], "Nice site");
        assert!(value.get("honeypot").is_none());
    }

    #[test]
    fn test_honeypot_rejected_first() {
        let form = ContactForm {
            honeypot: "buy now".into(),
            name: String::new(),
            ..filled()
        };
        assert!(matches!(form.into_message(), Err(ContactError::Honeypot)));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let form = ContactForm {
            email: "  ".into(),
            message: String::new(),
            ..filled()
        };
        let err = form.into_message().unwrap_err();
        assert!(matches!(err, ContactError::MissingField("email")));
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(SubmissionOutcome::from_status(200), SubmissionOutcome::Success);
        assert_eq!(SubmissionOutcome::from_status(204), SubmissionOutcome::Success);
        assert_eq!(SubmissionOutcome::from_status(400), SubmissionOutcome::Failure);
        assert_eq!(SubmissionOutcome::from_status(500).modal_id(), "errorModal");
    }

    #[test]
    fn test_response_bodies() {
        let ok: ContactResponse = serde_json::from_str(r#"{"message":"Email sent successfully"}"#).unwrap();
        assert_eq!(ok.message.as_deref(), Some("Email sent successfully"));
        assert_eq!(ok.error, None);

        let err: ContactResponse = serde_json::from_str(r#"{"error":"name is required"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("name is required"));
    }
}

//! Submitter input: the raw draft and its normalization rules.
//!
//! All text fields are trimmed before anything else; a field that is empty
//! after trimming counts as absent. Optional fields are truncated to their
//! maximum length rather than rejected. The message is the one exception:
//! it is a required field with a hard ceiling, and exceeding it is a
//! validation failure.

use serde::Deserialize;

/// Maximum length of the submitter name, in characters.
pub const MAX_NAME_LEN: usize = 80;
/// Maximum length of the optional email address, in characters.
pub const MAX_EMAIL_LEN: usize = 120;
/// Maximum length of each of the optional role/company/project fields.
pub const MAX_ATTRIBUTION_LEN: usize = 80;
/// Hard ceiling on the testimonial message, in characters.
pub const MAX_MESSAGE_LEN: usize = 1200;

/// Raw testimonial submission as parsed from a request body.
///
/// Every field defaults to empty so the same type deserializes from JSON,
/// form-urlencoded, and multipart bodies with any subset of fields present.
/// The honeypot field keeps its wire name `bot-field`: legitimate clients
/// never fill it, so any non-empty value marks the submission as automated.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TestimonialDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "bot-field")]
    pub bot_field: String,
}

/// Validation failures for a draft. Messages are client-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Name is required")]
    NameRequired,
    #[error("Testimonial is required")]
    MessageRequired,
    #[error("Testimonial is too long")]
    MessageTooLong,
    #[error("Invalid email")]
    InvalidEmail,
}

/// A draft that has passed validation: trimmed, clamped, with empty
/// optional fields collapsed to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDraft {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub project: Option<String>,
    pub message: String,
}

impl TestimonialDraft {
    /// True when the honeypot field carries any non-whitespace content.
    pub fn is_bot(&self) -> bool {
        !self.bot_field.trim().is_empty()
    }

    /// Trim, clamp, and validate the draft.
    ///
    /// ## Errors
    ///
    /// - `NameRequired` / `MessageRequired`: empty after trimming
    /// - `MessageTooLong`: message exceeds [`MAX_MESSAGE_LEN`] characters
    /// - `InvalidEmail`: email present but not `local@domain.tld`-shaped,
    ///   or longer than [`MAX_EMAIL_LEN`]
    pub fn normalize(&self) -> Result<NormalizedDraft, DraftError> {
        let name = clamp(&self.name, MAX_NAME_LEN);
        let email = self.email.trim();
        let role = clamp(&self.role, MAX_ATTRIBUTION_LEN);
        let company = clamp(&self.company, MAX_ATTRIBUTION_LEN);
        let project = clamp(&self.project, MAX_ATTRIBUTION_LEN);
        let message = self.message.trim();

        if name.is_empty() {
            return Err(DraftError::NameRequired);
        }
        if message.is_empty() {
            return Err(DraftError::MessageRequired);
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(DraftError::MessageTooLong);
        }
        if !email.is_empty() && !is_valid_email(email) {
            return Err(DraftError::InvalidEmail);
        }

        Ok(NormalizedDraft {
            name,
            email: none_if_empty(email.to_string()),
            role: none_if_empty(role),
            company: none_if_empty(company),
            project: none_if_empty(project),
            message: message.to_string(),
        })
    }
}

/// Trim, then truncate to `max_len` characters.
fn clamp(s: &str, max_len: usize) -> String {
    let text = s.trim();
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn none_if_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Loose shape check: `local@domain.tld` with no whitespace, bounded length.
/// Full RFC parsing is deliberately out of scope.
fn is_valid_email(email: &str) -> bool {
    if email.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

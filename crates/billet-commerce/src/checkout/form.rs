//! Customer contact form.

use std::sync::OnceLock;

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters treated as whitespace by browser form checks: ASCII spaces,
/// the Unicode space separators, line/paragraph separators and U+FEFF.
/// Unlike Unicode `White_Space`, U+0085 is not included.
const FORM_SPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// Contact details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerDetails {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Check the form locally. The first problem found is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingFullName);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        Ok(())
    }
}

/// Loose email shape check: somewhere in the input there is a run of
/// non-space characters of the form `x@y.z`, with "space" as in
/// `FORM_SPACE`.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = EMAIL.get_or_init(|| {
        let part = format!("[^{}]+", FORM_SPACE);
        Regex::new(&format!(r"{part}@{part}\.{part}")).ok()
    });
    pattern.as_ref().is_some_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CustomerDetails {
        CustomerDetails::new("Jean Dupont", "jean@example.com", "+33 6 12 34 56 78")
    }

    #[test]
    fn test_valid_form() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let form = CustomerDetails::new("  ", "", "");
        assert_eq!(form.validate(), Err(ValidationError::MissingFullName));

        let form = CustomerDetails::new("Jean", " ", "");
        assert_eq!(form.validate(), Err(ValidationError::MissingEmail));

        let form = CustomerDetails::new("Jean", "not-an-email", "");
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));

        let form = CustomerDetails {
            phone: "   ".to_string(),
            ..details()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("contact me at a@b.co please"));
        assert!(is_valid_email("@a@b.c"));
        assert!(is_valid_email("a@b.c."));

        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@bc"));
        assert!(!is_valid_email("a @b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_spaces_follow_form_rules() {
        assert!(!is_valid_email("jean\u{FEFF}@example.com"));
        assert!(!is_valid_email("jean@example\u{A0}.com"));
        assert!(!is_valid_email("jean@\u{3000}example.com"));
        // NEL is not a form space, so it reads as part of the address
        assert!(is_valid_email("jean\u{85}@example.com"));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::MissingFullName.to_string(), "Full name is required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Email is not valid");
    }
}

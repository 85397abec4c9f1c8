use std::{collections::BTreeMap, fmt};

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// A contact form submission whose fields have all passed validation.
///
/// Values of this type can only be obtained through [`ContactForm::validate`]
/// (or by constructing the validated field types directly), so a partially
/// valid submission cannot be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: Option<ContactPhone>,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[nutype(
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize))]
pub struct ContactPhone(String);

#[nutype(
    validate(len_char_min = 5),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// The raw values of the contact form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

/// Violation messages of a rejected [`ContactForm`], keyed by field.
///
/// Never empty when returned from [`ContactForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactFormErrors(BTreeMap<ContactField, &'static str>);

impl ContactForm {
    /// Validate all fields at once.
    ///
    /// Every violated field is reported, not just the first one.
    pub fn validate(self) -> Result<ContactSubmission, ContactFormErrors> {
        let name = ContactName::try_new(self.name).ok();
        let email = self.email.parse::<EmailAddress>().ok();
        let subject = ContactSubject::try_new(self.subject).ok();
        let message = ContactMessage::try_new(self.message).ok();
        let phone = self
            .phone
            .filter(|phone| !phone.is_empty())
            .map(ContactPhone::new);

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(ContactSubmission {
                name,
                email,
                phone,
                subject,
                message,
            }),
            (name, email, subject, message) => Err([
                (ContactField::Name, name.is_none()),
                (ContactField::Email, email.is_none()),
                (ContactField::Subject, subject.is_none()),
                (ContactField::Message, message.is_none()),
            ]
            .into_iter()
            .filter(|&(_, invalid)| invalid)
            .filter_map(|(field, _)| Some((field, field.violation()?)))
            .collect()),
        }
    }

    /// Validate a single field, e.g. to re-check it while the user is typing.
    ///
    /// Returns the violation message if `value` is not acceptable for `field`.
    pub fn validate_field(field: ContactField, value: &str) -> Option<&'static str> {
        let valid = match field {
            ContactField::Name => ContactName::try_new(value.to_owned()).is_ok(),
            ContactField::Email => value.parse::<EmailAddress>().is_ok(),
            ContactField::Phone => true,
            ContactField::Subject => ContactSubject::try_new(value.to_owned()).is_ok(),
            ContactField::Message => ContactMessage::try_new(value.to_owned()).is_ok(),
        };

        if valid {
            None
        } else {
            field.violation()
        }
    }
}

impl ContactField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Subject,
        Self::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// The message shown next to the field when its constraint is violated.
    ///
    /// `phone` is unconstrained and therefore has none.
    pub fn violation(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("Name must be at least 2 characters."),
            Self::Email => Some("Please enter a valid email address."),
            Self::Phone => None,
            Self::Subject => Some("Subject must be at least 5 characters."),
            Self::Message => Some("Message must be at least 10 characters."),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContactFormErrors {
    pub fn get(&self, field: ContactField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &'static str)> + '_ {
        self.0.iter().map(|(&field, &message)| (field, message))
    }
}

impl FromIterator<(ContactField, &'static str)> for ContactFormErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, &'static str)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ContactFormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactFormErrors {}

#[cfg(test)]
mod tests {
    use kindaccess_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Jo".into(),
            email: "a@b.co".into(),
            phone: None,
            subject: "Hello".into(),
            message: "Hello there!".into(),
        }
    }

    #[test]
    fn valid() {
        // Act
        let result = valid_form().validate();

        // Assert
        let submission = result.unwrap();
        assert_eq!(*submission.name, "Jo");
        assert_eq!(submission.email.as_str(), "a@b.co");
        assert_eq!(submission.phone, None);
        assert_eq!(*submission.subject, "Hello");
        assert_eq!(*submission.message, "Hello there!");
    }

    #[test]
    fn name_length() {
        for (name, ok) in [("Jo", true), ("J", false), ("", false), ("Zoë", true)] {
            let form = ContactForm {
                name: name.into(),
                ..valid_form()
            };
            match form.validate() {
                Ok(_) => assert!(ok, "{name:?} should be rejected"),
                Err(errors) => {
                    assert!(!ok, "{name:?} should be accepted");
                    assert_eq!(
                        errors.get(ContactField::Name),
                        Some("Name must be at least 2 characters.")
                    );
                    assert_eq!(errors.len(), 1);
                }
            }
        }
    }

    #[test]
    fn email_syntax() {
        let form = ContactForm {
            email: "not-an-email".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(ContactField::Email),
            Some("Please enter a valid email address.")
        );
        assert_eq!(errors.len(), 1);

        let form = ContactForm {
            email: "a@b.co".into(),
            ..valid_form()
        };
        assert_matches!(form.validate(), Ok(_));
    }

    #[test]
    fn subject_and_message_length() {
        let form = ContactForm {
            subject: "Hi!!".into(),
            message: "Too short".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                (ContactField::Subject, "Subject must be at least 5 characters."),
                (ContactField::Message, "Message must be at least 10 characters."),
            ]
        );

        let form = ContactForm {
            subject: "Hi!!!".into(),
            message: "Just right".into(),
            ..valid_form()
        };
        assert_matches!(form.validate(), Ok(_));
    }

    #[test]
    fn phone_is_unconstrained() {
        for phone in [None, Some(""), Some("x"), Some("+61 7 3000 0000")] {
            let form = ContactForm {
                phone: phone.map(Into::into),
                ..valid_form()
            };
            let submission = form.validate().unwrap();
            assert_eq!(
                submission.phone.as_deref().map(String::as_str),
                phone.filter(|p| !p.is_empty())
            );
        }
    }

    #[test]
    fn all_violations_reported() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert!(!errors.is_empty());
        for field in ContactField::ALL {
            assert_eq!(errors.contains(field), field != ContactField::Phone);
        }
    }

    #[test]
    fn validate_field_matches_validate() {
        for (field, value) in [
            (ContactField::Name, "J"),
            (ContactField::Email, "jo@"),
            (ContactField::Phone, ""),
            (ContactField::Subject, "abcd"),
            (ContactField::Message, "123456789"),
        ] {
            assert_eq!(ContactForm::validate_field(field, value), field.violation());
        }

        for (field, value) in [
            (ContactField::Name, "Jo"),
            (ContactField::Email, "jo@example.com"),
            (ContactField::Subject, "abcde"),
            (ContactField::Message, "1234567890"),
        ] {
            assert_eq!(ContactForm::validate_field(field, value), None);
        }
    }

    #[test]
    fn serialize_errors() {
        let errors = ContactForm {
            name: "J".into(),
            ..valid_form()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "name": "Name must be at least 2 characters." })
        );
        assert_eq!(errors.to_string(), "name: Name must be at least 2 characters.");
    }
}

use kindaccess_models::contact::{ContactForm, ContactFormErrors};
use serde::{Deserialize, Serialize};

/// Body of a contact form submission. All fields but `phone` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the author
    pub name: String,
    /// Email address of the author, receives the confirmation
    pub email: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Subject of the message
    pub subject: String,
    /// Content of the message
    pub message: String,
}

/// A possibly incomplete contact form, as sent for validation only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiContactFormValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ContactFormErrors>,
}

impl From<ApiContactSubmission> for ContactForm {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
        }
    }
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
        }
    }
}

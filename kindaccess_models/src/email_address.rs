use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A bare `addr-spec` email address, e.g. `jo@example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

/// An email address with an optional display name, e.g.
/// `Kind Access <hello@example.com>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Attach a display name. Control characters (e.g. line breaks) cannot
    /// appear in a mailbox header and are replaced by spaces.
    pub fn with_name(self, name: impl Into<String>) -> EmailAddressWithName {
        let name = name
            .into()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect::<String>();
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name),
            email: self.0,
        })
    }
}

impl EmailAddressWithName {
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    pub fn into_email_address(self) -> EmailAddress {
        EmailAddress(self.0.email)
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        Self(lettre::message::Mailbox {
            name: None,
            email: value.0,
        })
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_email_address() {
        for (input, ok) in [
            ("a@b.co", true),
            ("jo.smith+contact@example.com.au", true),
            ("not-an-email", false),
            ("@example.com", false),
            ("jo@", false),
            ("", false),
        ] {
            assert_eq!(input.parse::<EmailAddress>().is_ok(), ok, "{input:?}");
        }
    }

    #[test]
    fn parse_email_address_with_name() {
        let result = "Kind Access <hello@example.com>"
            .parse::<EmailAddressWithName>()
            .unwrap();
        assert_eq!(result.name(), Some("Kind Access"));
        assert_eq!(result.email(), "hello@example.com");

        let result = "hello@example.com".parse::<EmailAddressWithName>().unwrap();
        assert_eq!(result.name(), None);
    }

    #[test]
    fn with_name() {
        let result = "jo@example.com"
            .parse::<EmailAddress>()
            .unwrap()
            .with_name("Jo");
        assert_eq!(result.name(), Some("Jo"));
        assert_eq!(result.into_email_address().as_str(), "jo@example.com");
    }

    #[test]
    fn with_name_strips_control_characters() {
        for (name, expected) in [
            ("Jo\nCitizen", "Jo Citizen"),
            ("Jo\r\nBcc: x@y.z", "Jo  Bcc: x@y.z"),
            ("Jo\tCitizen", "Jo Citizen"),
            ("Zoë \"Jo\" Citizen", "Zoë \"Jo\" Citizen"),
        ] {
            let result = "jo@example.com"
                .parse::<EmailAddress>()
                .unwrap()
                .with_name(name);
            assert_eq!(result.name(), Some(expected));

            let mut display = String::new();
            fmt::Write::write_fmt(&mut display, format_args!("{result}")).unwrap();
            assert!(display.ends_with("<jo@example.com>"), "{display}");
            assert!(!display.contains(['\r', '\n']), "{display}");
        }
    }
}

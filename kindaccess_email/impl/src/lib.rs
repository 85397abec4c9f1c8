use std::{fmt, sync::Arc, time::Duration};

use anyhow::{anyhow, ensure, Context};
use kindaccess_email_contracts::{ContentType, Email, EmailService};
use kindaccess_models::email_address::EmailAddressWithName;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

mod http;
pub mod template;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends emails through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: Arc<EmailServiceConfig>,
    client: HttpClient,
}

#[derive(Clone)]
pub struct EmailServiceConfig {
    pub api_key: String,
    pub from: EmailAddressWithName,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl EmailServiceConfig {
    pub fn new(
        api_key: String,
        from: EmailAddressWithName,
        endpoint_override: Option<Url>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            from,
            endpoint: endpoint_override.unwrap_or_else(|| RESEND_ENDPOINT.parse().unwrap()),
            timeout,
        }
    }
}

impl fmt::Debug for EmailServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailServiceConfig")
            .field("api_key", &"[redacted]")
            .field("from", &self.from)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        ensure!(
            !config.api_key.trim().is_empty(),
            "No API key for the email provider configured"
        );

        let client = HttpClient::new(config.timeout)?;

        Ok(Self {
            config: config.into(),
            client,
        })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: mailbox(&self.config.from),
            to: [mailbox(&email.recipient)],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_ref().map(mailbox),
        };

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the email provider")?;

        let status = response.status();
        if status.is_success() {
            match response.json::<SendEmailResponse>().await {
                Ok(SendEmailResponse { id }) => {
                    debug!(%id, recipient = email.recipient.email(), "email accepted by provider")
                }
                Err(err) => warn!(
                    %status,
                    recipient = email.recipient.email(),
                    "email accepted by provider, but the response could not be parsed: {err}"
                ),
            }
            return Ok(());
        }

        let detail = response
            .json::<ErrorResponse>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| status.to_string());

        Err(anyhow!("Email provider refused the email ({status}): {detail}"))
    }
}

/// Format a mailbox for a header, falling back to the bare address if the
/// display name cannot be represented.
fn mailbox(mailbox: &EmailAddressWithName) -> String {
    let mut out = String::new();
    match fmt::Write::write_fmt(&mut out, format_args!("{mailbox}")) {
        Ok(()) => out,
        Err(_) => {
            warn!(email = mailbox.email(), "dropping unrepresentable display name");
            mailbox.email().to_owned()
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [String; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> EmailServiceConfig {
        EmailServiceConfig::new(
            api_key.into(),
            "Kind Access <onboarding@resend.dev>".parse().unwrap(),
            None,
            Duration::from_secs(10),
        )
    }

    #[test]
    fn default_endpoint_is_resend() {
        assert_eq!(config("key").endpoint.as_str(), RESEND_ENDPOINT);
    }

    #[test]
    fn missing_api_key() {
        for api_key in ["", "   "] {
            assert!(EmailServiceImpl::new(config(api_key)).is_err());
        }
        assert!(EmailServiceImpl::new(config("re_123")).is_ok());
    }

    #[test]
    fn api_key_is_redacted() {
        let sut = EmailServiceImpl::new(config("re_secret")).unwrap();
        assert!(!format!("{sut:?}").contains("re_secret"));
    }

    #[test]
    fn mailbox_falls_back_to_address() {
        let mut jo: EmailAddressWithName = "Jo Citizen <jo@example.com>".parse().unwrap();
        assert!(mailbox(&jo).ends_with("<jo@example.com>"));

        jo.0.name = Some("Jo\nBcc: x@y.z".into());
        assert_eq!(mailbox(&jo), "jo@example.com");
    }

    #[test]
    fn serialize_request() {
        let request = SendEmailRequest {
            from: "Kind Access <onboarding@resend.dev>".into(),
            to: ["jo@example.com".into()],
            subject: "Hi",
            html: Some("<p>Hi</p>"),
            text: None,
            reply_to: None,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "from": "Kind Access <onboarding@resend.dev>",
                "to": ["jo@example.com"],
                "subject": "Hi",
                "html": "<p>Hi</p>",
            })
        );
    }
}

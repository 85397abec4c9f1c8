use std::future::Future;

use kindaccess_models::email_address::EmailAddressWithName;
use kindaccess_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Notify the operator about a contact form submission. Replies go to
    /// `reply_to`, the author of the submission.
    fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Confirm the receipt of a contact form submission to its author.
    fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_contact_notification_email(
        mut self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: ContactNotificationTemplate,
        result: Result<(), &'static str>,
    ) -> Self {
        self.expect_send_contact_notification_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }

    pub fn with_send_contact_confirmation_email(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactConfirmationTemplate,
        result: Result<(), &'static str>,
    ) -> Self {
        self.expect_send_contact_confirmation_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}

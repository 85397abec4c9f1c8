use std::sync::Arc;

use kindaccess_core_contact_contracts::{ContactSendMessageError, ContactService};
use kindaccess_email_contracts::template::TemplateEmailService;
use kindaccess_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use kindaccess_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Receives the notification for every submission.
    pub email: Arc<EmailAddressWithName>,
}

impl<TemplateEmail> ContactServiceImpl<TemplateEmail> {
    pub fn new(template_email: TemplateEmail, config: ContactServiceConfig) -> Self {
        Self {
            template_email,
            config,
        }
    }
}

impl<TemplateEmail> ContactService for ContactServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        info!(?submission, "received contact form submission");

        let author = submission
            .email
            .clone()
            .with_name(submission.name.clone().into_inner());

        let notification = ContactNotificationTemplate {
            name: submission.name.clone().into_inner(),
            email: submission.email.as_str().into(),
            phone: submission.phone.map(|phone| phone.into_inner()),
            subject: submission.subject.clone().into_inner(),
            message: submission.message.into_inner(),
        };

        self.template_email
            .send_contact_notification_email(
                (*self.config.email).clone(),
                author.clone(),
                &notification,
            )
            .await
            .map_err(|err| {
                error!("Failed to send contact notification: {err:#}");
                ContactSendMessageError::Notification(err)
            })?;

        let confirmation = ContactConfirmationTemplate {
            name: submission.name.into_inner(),
            subject: submission.subject.into_inner(),
        };

        self.template_email
            .send_contact_confirmation_email(author, &confirmation)
            .await
            .map_err(|err| {
                error!("Failed to send contact confirmation: {err:#}");
                ContactSendMessageError::Confirmation(err)
            })?;

        info!("contact form submission relayed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kindaccess_email_contracts::template::MockTemplateEmailService;
    use kindaccess_models::contact::ContactForm;
    use kindaccess_utils::assert_matches;

    use super::*;

    fn config() -> ContactServiceConfig {
        ContactServiceConfig {
            email: Arc::new("Kind Access Team <team@kind-access.example>".parse().unwrap()),
        }
    }

    fn submission() -> ContactSubmission {
        ContactForm {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            phone: Some("+61 7 3000 0000".into()),
            subject: "Support coordination".into(),
            message: "Hello World! Tell me more.".into(),
        }
        .validate()
        .unwrap()
    }

    fn author() -> EmailAddressWithName {
        "Max Mustermann <max.mustermann@example.de>".parse().unwrap()
    }

    fn notification() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            phone: Some("+61 7 3000 0000".into()),
            subject: "Support coordination".into(),
            message: "Hello World! Tell me more.".into(),
        }
    }

    fn confirmation() -> ContactConfirmationTemplate {
        ContactConfirmationTemplate {
            name: "Max Mustermann".into(),
            subject: "Support coordination".into(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = config();

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                (*config.email).clone(),
                author(),
                notification(),
                Ok(()),
            )
            .with_send_contact_confirmation_email(author(), confirmation(), Ok(()));

        let sut = ContactServiceImpl::new(template_email, config);

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn without_phone() {
        // Arrange
        let config = config();
        let submission = ContactSubmission {
            phone: None,
            ..submission()
        };

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                (*config.email).clone(),
                author(),
                ContactNotificationTemplate {
                    phone: None,
                    ..notification()
                },
                Ok(()),
            )
            .with_send_contact_confirmation_email(author(), confirmation(), Ok(()));

        let sut = ContactServiceImpl::new(template_email, config);

        // Act
        let result = sut.send_message(submission).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn notification_fails() {
        // Arrange
        let config = config();

        // no confirmation is expected, the mock panics if one is attempted
        let template_email = MockTemplateEmailService::new().with_send_contact_notification_email(
            (*config.email).clone(),
            author(),
            notification(),
            Err("API key is invalid"),
        );

        let sut = ContactServiceImpl::new(template_email, config);

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Notification(_)));
    }

    #[tokio::test]
    async fn confirmation_fails_after_notification_was_sent() {
        // Arrange
        let config = config();

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                (*config.email).clone(),
                author(),
                notification(),
                Ok(()),
            )
            .with_send_contact_confirmation_email(
                author(),
                confirmation(),
                Err("The recipient is not allowed."),
            );

        let sut = ContactServiceImpl::new(template_email, config);

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        let err = result.unwrap_err();
        assert_matches!(&err, ContactSendMessageError::Confirmation(_));
        assert_eq!(
            err.to_string(),
            "Failed to send the confirmation email: The recipient is not allowed."
        );
    }
}

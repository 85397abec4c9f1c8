use kindaccess_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use kindaccess_models::email_address::EmailAddressWithName;
use kindaccess_templates_contracts::{
    ContactConfirmationTemplate, ContactNotificationTemplate, Template, TemplateService,
};
use kindaccess_utils::Apply;

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS> {
    pub fn new(email: EmailS, template: TemplateS) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> TemplateEmailService for TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<()> {
        let subject = format!("New Contact Form Submission: {}", data.subject);
        self.send_email(recipient, Some(reply_to), data, subject)
            .await
    }

    async fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> anyhow::Result<()> {
        self.send_email(recipient, None, data, "We've received your message")
            .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<()> {
        let email = Email {
            recipient,
            subject: subject.into(),
            body: self.template.render(data)?,
            content_type: ContentType::Html,
            reply_to: None,
        }
        .apply_map(reply_to, |email, reply_to| Email {
            reply_to: Some(reply_to),
            ..email
        });

        self.email.send(email).await
    }
}

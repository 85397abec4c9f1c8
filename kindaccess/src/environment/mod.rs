use kindaccess_config::{Config, EmailConfig};
use kindaccess_core_contact_impl::ContactServiceConfig;
use kindaccess_email_impl::EmailServiceConfig;
use types::{Contact, Email, RestServer, Template, TemplateEmail};

pub mod types;

/// Wire up all services for the http server.
pub fn build(config: &Config) -> anyhow::Result<RestServer> {
    let template_email = TemplateEmail::new(email(&config.email)?, Template::new()?);

    let contact = Contact::new(
        template_email,
        ContactServiceConfig {
            email: config.contact.email.clone().into(),
        },
    );

    Ok(RestServer::new(contact))
}

pub fn email(config: &EmailConfig) -> anyhow::Result<Email> {
    Email::new(EmailServiceConfig::new(
        config.api_key.clone(),
        config.from.clone(),
        config.endpoint_override.clone(),
        config.timeout.into(),
    ))
}

use clap::Subcommand;
use kindaccess_config::Config;
use kindaccess_email_contracts::{ContentType, Email, EmailService};
use kindaccess_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = environment::email(&config.email)?;

    info!(%recipient, "Sending test email");
    email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;
    info!("Test email accepted by the provider");

    Ok(())
}

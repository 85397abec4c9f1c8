use kindaccess_config::Config;
use tracing::info;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        endpoint = config
            .email
            .endpoint_override
            .as_ref()
            .map_or("resend", |url| url.as_str()),
        from = %config.email.from,
        "Configuring email provider"
    );
    info!(recipient = %config.contact.email, "Contact form notifications enabled");

    let server = environment::build(&config)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}

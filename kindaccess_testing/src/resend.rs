//! A fake of the Resend `POST /emails` endpoint.
//!
//! Accepted emails are kept in an [`Outbox`] instead of being delivered.
//! Recipients in the [`REJECTED_DOMAIN`] domain are refused with a validation
//! error, which lets tests exercise delivery failures.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Emails to any address in this domain are rejected.
pub const REJECTED_DOMAIN: &str = "reject.test";

#[derive(Debug)]
pub struct ResendTestServer {
    listener: TcpListener,
    state: Arc<ServerState>,
}

#[derive(Debug)]
struct ServerState {
    api_key: String,
    outbox: Outbox,
}

/// Shared view of the emails the fake has accepted so far.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<ReceivedEmail>>>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub id: Uuid,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

impl ResendTestServer {
    /// Bind the fake to `host:port`. Pass port `0` to pick a free port.
    pub async fn bind(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;

        Ok(Self {
            listener,
            state: ServerState {
                api_key,
                outbox: Outbox::default(),
            }
            .into(),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener.local_addr().map_err(Into::into)
    }

    /// The url of the emails endpoint, to be used as the provider endpoint.
    pub fn endpoint(&self) -> anyhow::Result<String> {
        Ok(format!("http://{}{EMAILS_ROUTE}", self.local_addr()?))
    }

    pub fn outbox(&self) -> Outbox {
        self.state.outbox.clone()
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.local_addr()?;
        info!("Starting resend testing server on {addr}");
        info!("Emails endpoint: http://{addr}{EMAILS_ROUTE}");
        info!("API key: {:?}", self.state.api_key);
        info!("Emails to any address @{REJECTED_DOMAIN} are rejected");

        let router = Router::new()
            .route(EMAILS_ROUTE, routing::post(send_email).get(list_emails))
            .with_state(self.state);

        axum::serve(self.listener, router)
            .await
            .context("Failed to start HTTP server")
    }
}

impl Outbox {
    pub async fn emails(&self) -> Vec<ReceivedEmail> {
        self.0.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    name: &'static str,
    message: String,
}

async fn send_email(
    state: State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|api_key| api_key == state.api_key);
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "validation_error", "API key is invalid");
    }

    if request.to.is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_required_field",
            "Missing `to` field.",
        );
    }

    if let Some(rejected) = request
        .to
        .iter()
        .find(|to| to.trim_end_matches('>').ends_with(&format!("@{REJECTED_DOMAIN}")))
    {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            &format!("Invalid `to` field. The recipient {rejected} is not allowed."),
        );
    }

    let email = ReceivedEmail {
        id: Uuid::new_v4(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    };
    let id = email.id;
    info!(%id, to = ?email.to, subject = %email.subject, "accepted email");
    state.outbox.0.lock().await.push(email);

    Json(SendEmailResponse { id }).into_response()
}

async fn list_emails(state: State<Arc<ServerState>>) -> Json<Vec<ReceivedEmail>> {
    Json(state.outbox.emails().await)
}

fn error(status: StatusCode, name: &'static str, message: &str) -> Response {
    let body = ErrorResponse {
        status_code: status.as_u16(),
        name,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

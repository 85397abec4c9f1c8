use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use kindaccess_core_contact_contracts::ContactService;
use kindaccess_models::contact::ContactForm;
use tracing::warn;

use super::{failure, success};
use crate::models::{
    contact::{ApiContactForm, ApiContactFormValidation, ApiContactSubmission},
    ApiErrorKind,
};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/send-contact-email", routing::post(send_message))
        .route("/api/send-email", routing::post(send_message))
        .route("/validate-contact-form", routing::post(validate))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match body {
        Ok(Json(submission)) => ContactForm::from(submission).validate(),
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!(%detail, "rejected malformed contact form submission");
            return failure(ApiErrorKind::MalformedRequest, detail);
        }
    };

    let submission = match submission {
        Ok(submission) => submission,
        Err(errors) => {
            warn!(%errors, "rejected invalid contact form submission");
            return failure(ApiErrorKind::MalformedRequest, errors.to_string());
        }
    };

    match service.send_message(submission).await {
        Ok(()) => success(),
        Err(err) => failure(ApiErrorKind::DeliveryFailed, err.to_string()),
    }
}

async fn validate(body: Result<Json<ApiContactForm>, JsonRejection>) -> Response {
    let form = match body {
        Ok(Json(form)) => form,
        Err(rejection) => return failure(ApiErrorKind::MalformedRequest, rejection.body_text()),
    };

    match ContactForm::from(form).validate() {
        Ok(_) => Json(ApiContactFormValidation {
            valid: true,
            errors: None,
        })
        .into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiContactFormValidation {
                valid: false,
                errors: Some(errors),
            }),
        )
            .into_response(),
    }
}

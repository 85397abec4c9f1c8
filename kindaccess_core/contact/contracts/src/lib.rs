use std::future::Future;

use kindaccess_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Relay a validated submission: first notify the operator, then confirm
    /// the receipt to the author.
    ///
    /// Each email is attempted exactly once. A failed confirmation does not
    /// undo the notification that was already sent.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    /// Nothing was sent.
    #[error("Failed to send the operator notification: {0:#}")]
    Notification(#[source] anyhow::Error),
    /// The operator notification has already been sent.
    #[error("Failed to send the confirmation email: {0:#}")]
    Confirmation(#[source] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

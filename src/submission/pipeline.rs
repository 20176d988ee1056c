use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::email::{templates, Notifier};
use crate::error::IntakeError;
use crate::sheets::SheetStore;
use crate::state::SharedState;

use super::{header_cells, parser, Row, Submission};

/// Result of an accepted submission.
#[derive(Debug)]
pub enum Outcome {
    /// Row appended and notification sent.
    Recorded,
    /// The submission parsed but recording it failed.
    Degraded { raw: Value, cause: IntakeError },
}

/// Parse and record one submission. `Err` is reserved for requests that never reached
/// the recording step.
pub async fn run(state: &SharedState, body: &[u8]) -> Result<Outcome, IntakeError> {
    let (raw, submission) = parser::parse_body(body)?;
    tracing::debug!("Parsed submission: {raw}");

    let sheet = state
        .sheet
        .as_deref()
        .ok_or_else(|| IntakeError::NotConfigured("Spreadsheet".to_string()))?;

    let result = record(
        sheet,
        state.notifier.as_deref(),
        &state.config.notify_to,
        &submission,
        Utc::now(),
    )
    .await;

    match result {
        Ok(()) => Ok(Outcome::Recorded),
        Err(cause) => Ok(Outcome::Degraded { raw, cause }),
    }
}

/// Append the submission to the sheet and send the notification email.
pub async fn record(
    sheet: &dyn SheetStore,
    notifier: Option<&dyn Notifier>,
    notify_to: &str,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<(), IntakeError> {
    let row = Row::from_submission(submission, now);

    if sheet.row_count().await.map_err(IntakeError::Sheet)? == 0 {
        sheet
            .write_header(header_cells())
            .await
            .map_err(IntakeError::Sheet)?;
        tracing::info!("Added headers to sheet {}", sheet.id());
    }

    let subject = templates::application_subject(&row.product);
    let body = templates::render_application(&row);

    sheet
        .append_row(row.into_cells())
        .await
        .map_err(IntakeError::Sheet)?;
    tracing::info!("Submission saved to sheet {}", sheet.id());

    let notifier =
        notifier.ok_or_else(|| IntakeError::NotConfigured("Mail transport".to_string()))?;
    notifier
        .send(notify_to, &subject, &body)
        .await
        .map_err(IntakeError::Mail)?;
    tracing::info!("Notification email sent");

    Ok(())
}

/// Best-effort mail used on failure paths. Errors are logged and dropped.
pub async fn notify_best_effort(state: &SharedState, subject: &str, body: &str) {
    let Some(notifier) = state.notifier.as_deref() else {
        tracing::warn!("Mail transport not configured, dropping '{subject}'");
        return;
    };

    match notifier.send(&state.config.notify_to, subject, body).await {
        Ok(()) => tracing::info!("Sent '{subject}'"),
        Err(e) => tracing::error!("Failed to send '{subject}': {e}"),
    }
}

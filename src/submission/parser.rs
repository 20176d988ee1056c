use serde::Deserialize;
use serde_json::Value;

use crate::error::IntakeError;

use super::Submission;

/// Parse a request body into the raw JSON object and the typed submission.
///
/// The content type is not consulted: pages posting cross-origin commonly send JSON as
/// `text/plain` to avoid a preflight.
pub fn parse_body(body: &[u8]) -> Result<(Value, Submission), IntakeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(IntakeError::NoBody);
    }

    let raw: Value =
        serde_json::from_slice(body).map_err(|e| IntakeError::InvalidJson(e.to_string()))?;

    if !raw.is_object() {
        return Err(IntakeError::NotObject);
    }

    let submission =
        Submission::deserialize(&raw).map_err(|e| IntakeError::InvalidJson(e.to_string()))?;
    Ok((raw, submission))
}

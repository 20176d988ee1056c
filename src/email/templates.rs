use serde_json::Value;

use crate::submission::Row;

pub fn application_subject(product: &str) -> String {
    format!("🎯 New Application: {product}")
}

pub fn render_application(row: &Row) -> String {
    format!(
        "📋 NEW APPLICATION RECEIVED

🎯 Product: {product}
👤 Username: {username}
📧 Email: {email}
📱 Instagram: {instagram}
🎵 TikTok: {tiktok}
📺 YouTube: {youtube}
💬 WhatsApp: {whatsapp}
💰 Video Price: ${video_price}
🎁 Free Shoot: {free_shoot}
⏰ Timestamp: {timestamp}

---
This application was submitted through the website application form.",
        product = row.product,
        username = row.username,
        email = row.email,
        instagram = row.instagram,
        tiktok = row.tiktok,
        youtube = row.youtube,
        whatsapp = row.whatsapp,
        video_price = row.video_price,
        free_shoot = row.free_shoot,
        timestamp = row.timestamp,
    )
}

pub const SHEET_ERROR_SUBJECT: &str = "🚨 Application Received (Sheet Error)";

pub fn render_sheet_error(raw: &Value, error: &str, sheet_id: &str) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!(
        "An application was received but couldn't be saved to sheet:

{pretty}

Sheet Error: {error}

Sheet ID used: {sheet_id}"
    )
}

pub const FORM_ERROR_SUBJECT: &str = "🚨 Form Submission Error";

pub fn render_form_error(error: &str, raw_body: &str) -> String {
    let shown = if raw_body.is_empty() { "(empty)" } else { raw_body };
    format!(
        "Form submission failed:

Error: {error}

Request body: {shown}

This error occurred in the intake service."
    )
}

pub const SELF_TEST_SUBJECT: &str = "✅ Test Email - Intake Service Working";

pub fn render_self_test(raw: &Value, at: &str) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!(
        "This is a test email to confirm the intake service is working correctly.

Test Data:
{pretty}

If you received this email, the service is properly configured!

Timestamp: {at}"
    )
}

pub const SELF_TEST_FAILED_SUBJECT: &str = "❌ Intake Service Self Test Failed";

pub fn render_self_test_failed(error: &str, at: &str) -> String {
    format!(
        "The intake service self test failed:

Error: {error}

Please check:
1. SHEET_ID and SHEETS_ACCESS_TOKEN are correct
2. The token has permission to edit the spreadsheet
3. The sheet named by SHEET_NAME exists

Test run at: {at}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Submission;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn application_body_lists_every_field() {
        let submission = Submission {
            product: Some("Glow Serum".into()),
            username: Some("jane".into()),
            video_price: Some("150".into()),
            ..Default::default()
        };
        let row = Row::from_submission(&submission, Utc::now());
        let body = render_application(&row);

        assert!(body.starts_with("📋 NEW APPLICATION RECEIVED"));
        assert!(body.contains("🎯 Product: Glow Serum"));
        assert!(body.contains("👤 Username: jane"));
        assert!(body.contains("📧 Email: Not provided"));
        assert!(body.contains("💰 Video Price: $150"));
        assert!(body.contains("🎁 Free Shoot: No"));
        assert_eq!(application_subject(&row.product), "🎯 New Application: Glow Serum");
    }

    #[test]
    fn sheet_error_body_carries_raw_payload_and_cause() {
        let body = render_sheet_error(&json!({"product": "Kit"}), "quota exceeded", "sheet-123");
        assert!(body.contains("\"product\": \"Kit\""));
        assert!(body.contains("Sheet Error: quota exceeded"));
        assert!(body.ends_with("Sheet ID used: sheet-123"));
    }

    #[test]
    fn form_error_body_marks_empty_request() {
        let body = render_form_error("No valid POST data received", "");
        assert!(body.contains("Error: No valid POST data received"));
        assert!(body.contains("Request body: (empty)"));
    }
}

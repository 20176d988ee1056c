pub mod parser;
pub mod pipeline;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const HEADER: [&str; 10] = [
    "Timestamp",
    "Product",
    "Username",
    "Email",
    "Instagram",
    "TikTok",
    "YouTube",
    "WhatsApp",
    "Video Price",
    "Free Shoot",
];

pub const NOT_PROVIDED: &str = "Not provided";
pub const UNKNOWN_PRODUCT: &str = "Unknown";
pub const NO_FREE_SHOOT: &str = "No";

/// One application form payload. Every field is optional; see [`Row::from_submission`]
/// for the defaults applied when a value is absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tiktok: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub whatsapp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub video_price: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub free_shoot: Option<String>,
}

/// Web forms send a mix of strings, numbers and booleans. Text and non-zero numbers are
/// kept; `null`, `false`, `0` and the empty string count as absent.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(present_text(&value))
}

fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

/// The ten spreadsheet columns of a submission, defaults resolved, in [`HEADER`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: String,
    pub product: String,
    pub username: String,
    pub email: String,
    pub instagram: String,
    pub tiktok: String,
    pub youtube: String,
    pub whatsapp: String,
    pub video_price: String,
    pub free_shoot: String,
}

impl Row {
    pub fn from_submission(submission: &Submission, now: DateTime<Utc>) -> Self {
        let or_not_provided =
            |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_PROVIDED.to_string());

        Row {
            timestamp: submission
                .timestamp
                .clone()
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            product: submission
                .product
                .clone()
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            username: or_not_provided(&submission.username),
            email: or_not_provided(&submission.email),
            instagram: or_not_provided(&submission.instagram),
            tiktok: or_not_provided(&submission.tiktok),
            youtube: or_not_provided(&submission.youtube),
            whatsapp: or_not_provided(&submission.whatsapp),
            video_price: or_not_provided(&submission.video_price),
            free_shoot: submission
                .free_shoot
                .clone()
                .unwrap_or_else(|| NO_FREE_SHOOT.to_string()),
        }
    }

    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.timestamp,
            self.product,
            self.username,
            self.email,
            self.instagram,
            self.tiktok,
            self.youtube,
            self.whatsapp,
            self.video_price,
            self.free_shoot,
        ]
    }
}

pub fn header_cells() -> Vec<String> {
    HEADER.iter().map(|h| h.to_string()).collect()
}

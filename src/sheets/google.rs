use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::SheetStore;
use crate::config::SheetConfig;

const LAST_COLUMN: &str = "J";

/// Google Sheets API v4 client scoped to one sheet (tab) of one spreadsheet.
pub struct GoogleSheet {
    client: reqwest::Client,
    config: SheetConfig,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<serde_json::Value>,
}

impl GoogleSheet {
    pub fn new(config: SheetConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client, config })
    }

    /// `{api_base}/v4/spreadsheets/{id}/values/{sheet}!{range}`, each segment
    /// percent-encoded so tab names may contain `#`, `?` or `/`.
    fn values_url(&self, range: &str) -> Result<reqwest::Url, String> {
        let sheet_range = format!("{}!{range}", self.config.name);
        let mut url = reqwest::Url::parse(&self.config.api_base)
            .map_err(|e| format!("Invalid sheets API base '{}': {e}", self.config.api_base))?;

        url.path_segments_mut()
            .map_err(|_| format!("Sheets API base '{}' cannot hold a path", self.config.api_base))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.id.as_str(),
                "values",
                sheet_range.as_str(),
            ]);

        Ok(url)
    }

    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, String> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(512)
            .collect::<String>();
        Err(format!("{what} failed with status {}: {body}", status.as_u16()))
    }
}

#[async_trait]
impl SheetStore for GoogleSheet {
    fn id(&self) -> &str {
        &self.config.id
    }

    async fn row_count(&self) -> Result<usize, String> {
        let resp = self
            .client
            .get(self.values_url(&format!("A:{LAST_COLUMN}"))?)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| format!("Sheet read request failed: {e}"))?;

        let range: ValueRange = Self::check(resp, "Sheet read")
            .await?
            .json()
            .await
            .map_err(|e| format!("Invalid sheet read response: {e}"))?;

        Ok(range.values.len())
    }

    async fn write_header(&self, header: Vec<String>) -> Result<(), String> {
        let resp = self
            .client
            .put(self.values_url(&format!("A1:{LAST_COLUMN}1"))?)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "values": [header] }))
            .send()
            .await
            .map_err(|e| format!("Header write request failed: {e}"))?;

        Self::check(resp, "Header write").await?;
        Ok(())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<(), String> {
        let url = self.values_url(&format!("A:{LAST_COLUMN}:append"))?;
        let resp = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| format!("Row append request failed: {e}"))?;

        Self::check(resp, "Row append").await?;
        Ok(())
    }
}

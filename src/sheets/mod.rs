pub mod google;

use async_trait::async_trait;

/// A spreadsheet that submissions are appended to.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Identifier reported in fallback emails.
    fn id(&self) -> &str;
    /// Number of rows currently holding data.
    async fn row_count(&self) -> Result<usize, String>;
    async fn write_header(&self, header: Vec<String>) -> Result<(), String>;
    async fn append_row(&self, row: Vec<String>) -> Result<(), String>;
}

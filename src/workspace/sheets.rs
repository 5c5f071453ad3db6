//! workspace::sheets
//!
//! Google Sheets API v4 client.

use std::sync::Arc;

use serde_json::{json, Value};

use super::transport::{ApiError, Transport};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct Sheets {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Sheets);

impl Sheets {
    /// Spreadsheet metadata (title plus per-sheet properties).
    pub async fn get_spreadsheet(&self, id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/{}", SHEETS_API_BASE, id);
        let params = vec![(
            "fields",
            "spreadsheetId,properties(title),sheets(properties)".to_string(),
        )];
        self.transport.get(&url, &params).await
    }

    /// Read a range of cell values in A1 notation.
    pub async fn get_values(&self, id: &str, range: &str) -> Result<Value, ApiError> {
        let url = format!("{}/{}/values/{}", SHEETS_API_BASE, id, range);
        self.transport.get(&url, &[]).await
    }

    /// Overwrite a range with new values.
    pub async fn update_values(
        &self,
        id: &str,
        range: &str,
        values: &Value,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            SHEETS_API_BASE, id, range
        );
        let body = json!({ "range": range, "values": values });
        self.transport.put(&url, &body).await
    }

    /// Append rows after the last row of a range's table.
    pub async fn append_values(
        &self,
        id: &str,
        range: &str,
        values: &Value,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            SHEETS_API_BASE, id, range
        );
        let body = json!({ "values": values });
        self.transport.post(&url, &body).await
    }
}

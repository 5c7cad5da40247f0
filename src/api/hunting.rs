use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The hunting query we submit, verbatim.
/// Finds the two most recent processes launched by PowerShell.
pub const HUNTING_QUERY: &str = r#"
DeviceProcessEvents
| where InitiatingProcessFileName =~ "powershell.exe"
| project Timestamp, FileName, InitiatingProcessFileName
| order by Timestamp desc
| limit 2
"#;

/// A single row as returned by the API.
/// Its columns depend entirely on the query, so we keep it untyped.
pub type ResultRow = Map<String, Value>;

/// The request body for `advancedhunting/run`.
#[derive(Serialize, Debug)]
pub struct HuntingRequest<'a> {
    #[serde(rename = "Query")]
    pub query: &'a str,
}

/// The response from `advancedhunting/run`.
///
/// The API also returns a `Schema` describing each column,
/// which we have no need for.
#[derive(Deserialize, Debug)]
pub struct HuntingResponse {
    #[serde(rename = "Results", default)]
    results: Option<Vec<ResultRow>>,
}

impl HuntingResponse {
    /// Rows in the order the API returned them.
    /// An absent (or null) `Results` field yields no rows.
    pub fn rows(&self) -> &[ResultRow] {
        self.results.as_deref().unwrap_or_default()
    }
}

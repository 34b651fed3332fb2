// Exchange - import/export payload codec for the performance list
//
// Export is a pure read: the current list serialized as a JSON array for the
// user to copy. Import parses user-pasted JSON and must fail fast without
// touching state; the UI surfaces the error as a blocking notice and only
// dispatches the import intent on success.

use crate::library::state::Performance;

/// Exchange payload error types
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("invalid performances JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the performance list for export.
pub fn export_performances(performances: &[Performance]) -> Result<String, ExchangeError> {
    Ok(serde_json::to_string(performances)?)
}

/// Parse an import payload into a performance list.
pub fn import_performances(json: &str) -> Result<Vec<Performance>, ExchangeError> {
    Ok(serde_json::from_str(json)?)
}

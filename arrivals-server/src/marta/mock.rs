//! Mock MARTA client for running without an API key.
//!
//! Serves a snapshot loaded from a JSON file in the same shape the live API
//! returns.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::client::parse_arrivals;
use super::convert::convert_arrivals;
use super::error::MartaError;
use super::types::RailArrival;
use crate::domain::ArrivalRecord;

/// Mock client that serves arrivals from a file.
#[derive(Debug, Clone)]
pub struct MockMartaClient {
    path: PathBuf,
    rows: Arc<RwLock<Vec<RailArrival>>>,
}

impl MockMartaClient {
    /// Load a snapshot file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MartaError> {
        let path = path.as_ref().to_path_buf();
        let rows = load(&path)?;

        Ok(Self {
            path,
            rows: Arc::new(RwLock::new(rows)),
        })
    }

    /// The loaded rows, converted as the live client would.
    pub async fn fetch_arrivals(&self) -> Result<Vec<ArrivalRecord>, MartaError> {
        let rows = self.rows.read().await;
        Ok(convert_arrivals(&rows))
    }

    /// Re-read the file from disk (useful while editing test data).
    ///
    /// On failure the previously loaded rows are kept.
    pub async fn reload(&self) -> Result<usize, MartaError> {
        let rows = load(&self.path)?;
        let count = rows.len();
        *self.rows.write().await = rows;
        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load(path: &Path) -> Result<Vec<RailArrival>, MartaError> {
    let json = std::fs::read_to_string(path).map_err(|e| MartaError::MockData {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    parse_arrivals(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TWO_ROWS: &str = r#"[
        {"DESTINATION":"Airport","DIRECTION":"S","LINE":"RED","STATION":"MIDTOWN STATION",
         "WAITING_SECONDS":"90","WAITING_TIME":"1 min"},
        {"DESTINATION":"Doraville","DIRECTION":"N","LINE":"GOLD","STATION":"LINDBERGH STATION",
         "WAITING_SECONDS":"300","WAITING_TIME":"5 min"}
    ]"#;

    #[tokio::test]
    async fn load_bundled_data() {
        let client = MockMartaClient::new("data/mock_arrivals.json").unwrap();
        let arrivals = client.fetch_arrivals().await.unwrap();

        assert!(!arrivals.is_empty());
        assert!(arrivals.iter().any(|a| a.line == "GOLD"));
    }

    #[tokio::test]
    async fn load_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arrivals.json");
        std::fs::write(&path, TWO_ROWS).unwrap();

        let client = MockMartaClient::new(&path).unwrap();
        assert_eq!(client.fetch_arrivals().await.unwrap().len(), 2);

        std::fs::write(&path, "[]").unwrap();
        assert_eq!(client.reload().await.unwrap(), 0);
        assert!(client.fetch_arrivals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arrivals.json");
        std::fs::write(&path, TWO_ROWS).unwrap();

        let client = MockMartaClient::new(&path).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(client.reload().await, Err(MartaError::Json { .. })));
        assert_eq!(client.fetch_arrivals().await.unwrap().len(), 2);
    }

    #[test]
    fn missing_file() {
        let result = MockMartaClient::new("/nonexistent/arrivals.json");
        assert!(matches!(result, Err(MartaError::MockData { .. })));
    }
}

//! Snapshot sources.

use std::future::Future;

use tracing::warn;

use crate::domain::ArrivalRecord;

use super::client::MartaClient;
use super::error::MartaError;
use super::mock::MockMartaClient;

/// Something that can deliver a full snapshot of arrivals.
///
/// Every call returns a complete replacement, never a delta.
pub trait ArrivalSource: Send + Sync {
    fn fetch_arrivals(&self) -> impl Future<Output = Result<Vec<ArrivalRecord>, MartaError>> + Send;
}

impl ArrivalSource for MartaClient {
    async fn fetch_arrivals(&self) -> Result<Vec<ArrivalRecord>, MartaError> {
        MartaClient::fetch_arrivals(self).await
    }
}

impl ArrivalSource for MockMartaClient {
    async fn fetch_arrivals(&self) -> Result<Vec<ArrivalRecord>, MartaError> {
        MockMartaClient::fetch_arrivals(self).await
    }
}

/// The source the server was started with.
pub enum ArrivalProvider {
    /// Live MARTA API.
    Live(MartaClient),
    /// Snapshot file on disk, re-read on every fetch.
    Mock(MockMartaClient),
}

impl ArrivalSource for ArrivalProvider {
    async fn fetch_arrivals(&self) -> Result<Vec<ArrivalRecord>, MartaError> {
        match self {
            ArrivalProvider::Live(client) => client.fetch_arrivals().await,
            ArrivalProvider::Mock(client) => {
                if let Err(e) = client.reload().await {
                    warn!(
                        path = %client.path().display(),
                        error = %e,
                        "failed to reload mock arrivals, keeping previous rows"
                    );
                }
                client.fetch_arrivals().await
            }
        }
    }
}

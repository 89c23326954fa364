use crate::client::GeocodeClient;
use crate::error::Result;
use crate::types::GeocodeResponse;

/// Resolve a free-text address to candidate locations.
///
/// A single search request per call. Errors go straight back to the caller.
pub async fn lookup_coordinates(client: &GeocodeClient, address: &str) -> Result<GeocodeResponse> {
    let response = client.search(address).await?;
    tracing::debug!(%address, results = response.results.len(), "coordinate lookup finished");
    Ok(response)
}

use async_trait::async_trait;

use crate::error::Result;
use crate::models::AddressCandidate;

/// Source of address suggestions for a typed prefix.
///
/// Implementations report non-2xx responses as [`GeoInputError::Api`] and
/// transport or body failures as `Network` / `Parse`. They never return
/// `Canceled`; the widget assigns that outcome itself.
///
/// [`GeoInputError::Api`]: crate::error::GeoInputError::Api
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, text: &str) -> Result<Vec<AddressCandidate>>;
}

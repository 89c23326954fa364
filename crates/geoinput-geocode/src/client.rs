use async_trait::async_trait;
use geoinput_core::{AddressCandidate, ApiConfig, SuggestionProvider};

use crate::error::{GeocodeError, Result};
use crate::http::JsonClient;
use crate::types::GeocodeResponse;

const AUTOCOMPLETE_PATH: &str = "/v1/geocode/autocomplete";
const SEARCH_PATH: &str = "/v1/geocode/search";
pub const DEFAULT_LIMIT: usize = 5;

/// Client for the geocoding autocomplete and search endpoints.
pub struct GeocodeClient {
    http: JsonClient,
    base_url: String,
    api_key: String,
    limit: usize,
}

impl GeocodeClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Self::with_params(&api, api_key.into(), DEFAULT_LIMIT)
    }

    /// Build from config, resolving the key from the config or environment.
    pub fn from_config(api: &ApiConfig, limit: usize) -> Result<Self> {
        let api_key = api
            .resolve_api_key()
            .map_err(|_| GeocodeError::MissingApiKey)?;
        Self::with_params(api, api_key, limit)
    }

    pub fn with_params(api: &ApiConfig, api_key: String, limit: usize) -> Result<Self> {
        if api_key.is_empty() {
            return Err(GeocodeError::MissingApiKey);
        }
        let base_url = api.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GeocodeError::InvalidUrl(api.base_url.clone()));
        }
        Ok(Self {
            http: JsonClient::new(api.timeout(), &api.user_agent)?,
            base_url,
            api_key,
            limit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// `GET /v1/geocode/autocomplete` for a typed prefix.
    pub async fn autocomplete(&self, text: &str) -> Result<GeocodeResponse> {
        let url = format!(
            "{}{AUTOCOMPLETE_PATH}?text={}&format=json&limit={}&apiKey={}",
            self.base_url,
            urlencoding::encode(text),
            self.limit,
            urlencoding::encode(&self.api_key),
        );
        self.http.get_json(&url).await
    }

    /// `GET /v1/geocode/search` for a complete free-text address.
    pub async fn search(&self, text: &str) -> Result<GeocodeResponse> {
        let url = format!(
            "{}{SEARCH_PATH}?text={}&format=json&apiKey={}",
            self.base_url,
            urlencoding::encode(text),
            urlencoding::encode(&self.api_key),
        );
        self.http.get_json(&url).await
    }
}

#[async_trait]
impl SuggestionProvider for GeocodeClient {
    async fn suggest(&self, text: &str) -> geoinput_core::Result<Vec<AddressCandidate>> {
        let response = self.autocomplete(text).await?;
        Ok(response.results)
    }
}

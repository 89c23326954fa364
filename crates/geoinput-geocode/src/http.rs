use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GeocodeError, Result};

// ─── JsonClient ──────────────────────────────────────────────────────────────

/// Thin GET-and-decode wrapper. One attempt per call; no retries, no cache.
pub struct JsonClient {
    client: reqwest::Client,
}

impl JsonClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                body: parse_error_body(&text),
            });
        }
        Ok(text)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get(url).await?;
        serde_json::from_str(&text).map_err(|e| GeocodeError::Parse(e.to_string()))
    }
}

/// Error bodies are JSON for this API; anything else is kept as a string.
fn parse_error_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use mockito::Server;
    use serde_json::json;

    use super::*;

    fn client() -> JsonClient {
        JsonClient::new(Duration::from_secs(5), "geoinput-test").unwrap()
    }

    #[tokio::test]
    async fn non_success_carries_parsed_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/fail")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"statusCode":401,"error":"Unauthorized","message":"Invalid apiKey"}"#)
            .create_async()
            .await;

        let err = client()
            .get(&format!("{}/fail", server.url()))
            .await
            .unwrap_err();
        match err {
            GeocodeError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body["message"], json!("Invalid apiKey"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_text() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/gateway")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client()
            .get(&format!("{}/gateway", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeocodeError::Api { status: 502, body: Value::String(ref s) } if s == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("{\"results\": [")
            .create_async()
            .await;

        let err = client()
            .get_json::<Value>(&format!("{}/broken", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Parse(_)));
    }
}

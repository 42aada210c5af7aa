//! Country directory HTTP client.
//!
//! One unauthenticated GET, no retry and no timeout. Parsing lives in
//! [`parse_countries`] so it can be tested without a network.

use crate::country::Country;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v2/all?fields=name,region,area";

/// Everything that can go wrong while loading the directory.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the full country list. Enables stubbing the network in tests.
#[async_trait::async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch every country.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network failure, a non-2xx status, or a
    /// body that is not a JSON array of countries.
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError>;
}

pub struct RestCountriesClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RestCountriesClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        tracing::info!(endpoint = %self.endpoint, "fetching country data");

        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_countries(&text)
    }
}

/// Decode the endpoint's JSON array.
pub fn parse_countries(body: &str) -> Result<Vec<Country>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_countries() {
        let body = r#"[
            {"name":"Afghanistan","region":"Asia","area":652230.0,"independent":false},
            {"name":"Fiji","region":"Oceania","area":18272}
        ]"#;
        let countries = parse_countries(body).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "Afghanistan");
        assert_eq!(countries[0].area, Some(652_230.0));
        assert_eq!(countries[1].region, "Oceania");
        assert_eq!(countries[1].area, Some(18_272.0));
    }

    #[test]
    fn test_parse_countries_missing_fields() {
        let countries = parse_countries(r#"[{"name":"Antarctica"}]"#).unwrap();
        assert_eq!(countries[0].region, "");
        assert_eq!(countries[0].area, None);
    }

    #[test]
    fn test_parse_countries_malformed() {
        assert!(matches!(parse_countries("not json"), Err(FetchError::Decode(_))));
        assert!(matches!(
            parse_countries(r#"{"status":404,"message":"Not Found"}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(parse_countries(r#"[{"region":"Asia"}]"#), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }
}

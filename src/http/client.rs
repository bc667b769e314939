use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiSettings;
use crate::errors::GatewayError;
use crate::session::Session;

/// HTTP client for the ratings API. Attaches the session's bearer token
/// and reports every failure as a `GatewayError`.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, session: Session) -> Result<Self> {
        let client = Self::build_client(&settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.url(path);
        let request = self.request(Method::GET, &url);
        self.execute_json(request, &url).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::POST, &url).json(body);
        self.execute_json(request, &url).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::PUT, &url).json(body);
        self.execute_json(request, &url).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        let url = self.url(path);
        let request = self.request(Method::DELETE, &url);
        self.send(request, &url).await.map(|_| ())
    }

    // --- Helper Methods ---

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, GatewayError> {
        debug!("Sending request to {}", url);

        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = GatewayError::from_response(status, &body);

        if error.is_unauthorized() {
            warn!("{} rejected the session token, signing out", url);
            self.session.sign_out();
        }

        Err(error)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, GatewayError> {
        let response = self.send(request, url).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| GatewayError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        let settings = ApiSettings {
            base_url: "http://ratings.local/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&settings, Session::new()).unwrap();

        assert_eq!(
            client.url("/ratings/movie/3"),
            "http://ratings.local/api/ratings/movie/3"
        );
        assert_eq!(
            client.url("statistics/movie/3"),
            "http://ratings.local/api/statistics/movie/3"
        );
    }
}

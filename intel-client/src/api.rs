use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

pub const DEFAULT_BASE_URL: &str = "/api";

/// Turns a root-relative base like `"/api"` into an absolute URL on the
/// given origin. Request URLs must be absolute, so a bare path base would
/// fail before anything reaches the network.
pub fn absolute_base_url(configured: &str, origin: &str) -> String {
    if configured.starts_with('/') {
        format!("{}{configured}", origin.trim_end_matches('/'))
    } else {
        configured.to_string()
    }
}

/// HTTP client for the threat intelligence backend. Attaches the session
/// bearer token to every request when one is stored.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Rc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Rc<dyn SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .execute(self.http.post(self.url(path)).json(body))
            .await?;
        decode(response).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .execute(self.http.put(self.url(path)).json(body))
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    pub async fn get_bytes(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Vec<u8>> {
        let response = self
            .execute(self.http.get(self.url(path)).query(query))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> ClientResult<reqwest::Response> {
        let request = match self.session.token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| extract_message(&body));
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Decoding is a separate step: a 2xx response with an unexpected body is a
/// `Decode` error, never a transport failure.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "detail", "error"] {
        if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
            return Some(text.to_string());
        }
    }
    None
}

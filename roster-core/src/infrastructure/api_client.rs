use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use roster_model::ApiErrorBody;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::api::v1;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Thin request/response translator for the remote demo API.
///
/// Every request carries the fixed API key header. Non-2xx responses and
/// transport failures surface as a single [`ApiError`]; there are no
/// retries and no client-side timeouts.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
    api_key: Arc<str>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: Url, api_key: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("rosterctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %base_url, "creating API client");

        Ok(Self {
            client,
            base_url,
            api_key: Arc::from(api_key.into()),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    /// Build an absolute URL for an API path such as `/api/users`
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            p.trim_start_matches('/')
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attach the API key header
    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.build_url(path))
            .header(v1::API_KEY_HEADER, self.api_key.as_ref())
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Translate a failed response into an [`ApiError`], pulling the
    /// message from the body's `error` field when it has one.
    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message().map(str::to_string));
        if message.is_none() && !body.is_empty() {
            warn!(
                status = status.as_u16(),
                "error response without an `error` field"
            );
        }
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<R> {
        let response = self.send(request).await?;
        response.json::<R>().await.map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// GET request with optional query parameters
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<R> {
        let request = self.build_request(Method::GET, path).query(query);
        self.execute(request).await
    }

    /// POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let request = self.build_request(Method::POST, path).json(body);
        self.execute(request).await
    }

    /// POST request whose response body is ignored; any 2xx counts as
    /// success.
    pub async fn post_discarding<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        let request = self.build_request(Method::POST, path).json(body);
        self.send(request).await.map(|_| ())
    }

    /// PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let request = self.build_request(Method::PUT, path).json(body);
        self.execute(request).await
    }

    /// DELETE request; any 2xx (typically 204 No Content) counts as success
    /// and the body is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.build_request(Method::DELETE, path);
        self.send(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), "reqres-free-v1").unwrap()
    }

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        let c = client("https://reqres.in/");
        assert_eq!(c.build_url("/api/users"), "https://reqres.in/api/users");
        assert_eq!(c.build_url("api/login"), "https://reqres.in/api/login");
    }

    #[test]
    fn build_url_passes_absolute_urls_through() {
        let c = client("https://reqres.in");
        assert_eq!(
            c.build_url("http://127.0.0.1:9000/api/users"),
            "http://127.0.0.1:9000/api/users"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", client("https://reqres.in"));
        assert!(!rendered.contains("reqres-free-v1"));
    }
}

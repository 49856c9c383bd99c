use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    domain::{Redirect, RedirectRequest},
    RedirectError, TokenProvider,
};

const REDIRECT_PATH: &str = "/api/v1/redirect";

// Statuses each operation reports as their own kind. Anything else that is
// not a success collapses into `RequestFailed`.
const LIST_STATUSES: &[StatusCode] = &[StatusCode::UNAUTHORIZED];
const GET_STATUSES: &[StatusCode] = &[StatusCode::NOT_FOUND];
const WRITE_STATUSES: &[StatusCode] = &[];
const DELETE_STATUSES: &[StatusCode] = &[StatusCode::NOT_FOUND];

/// Client for the redirect-management API.
///
/// Every request carries the provider's token verbatim in the
/// `Authorization` header. There are no retries and no client-side timeout.
#[derive(Debug, Clone)]
pub struct RedirectClient<T> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenProvider> RedirectClient<T> {
    pub fn new(base_url: &str, tokens: T) -> Result<Self, RedirectError> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| RedirectError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| RedirectError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, REDIRECT_PATH)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, REDIRECT_PATH, id)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
        recognized: &[StatusCode],
    ) -> Result<Response, RedirectError> {
        let token = self.tokens.token().map_err(|e| {
            tracing::warn!("{call_name} skipped: {e}");
            RedirectError::RequestFailed(e.to_string())
        })?;
        let Some(token) = token else {
            tracing::warn!("{call_name} skipped: no stored credential");
            return Err(RedirectError::Unauthorized);
        };

        tracing::debug!("calling {call_name}");
        let response = request
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{call_name} failed: {e}");
                RedirectError::RequestFailed(format!("Failed to call {call_name}: {e}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!("{call_name} returned {status}");
        Err(status_error(status, call_name, recognized))
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
        recognized: &[StatusCode],
    ) -> Result<R, RedirectError> {
        let response = self.send(request, call_name, recognized).await?;
        response.json::<R>().await.map_err(|e| {
            tracing::warn!("Failed to parse {call_name} response: {e}");
            RedirectError::RequestFailed(format!("Failed to parse {call_name} response: {e}"))
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
        recognized: &[StatusCode],
    ) -> Result<(), RedirectError> {
        let response = self.send(request, call_name, recognized).await?;
        if let Err(e) = response.bytes().await {
            tracing::debug!("Ignoring unreadable {call_name} response body: {e}");
        }
        Ok(())
    }

    /// GET /api/v1/redirect
    pub async fn list(&self) -> Result<Vec<Redirect>, RedirectError> {
        self.get_json(
            self.client.get(self.collection_url()),
            "GET /api/v1/redirect",
            LIST_STATUSES,
        )
        .await
    }

    /// GET /api/v1/redirect/{id}
    pub async fn get(&self, id: i64) -> Result<Redirect, RedirectError> {
        self.get_json(
            self.client.get(self.item_url(id)),
            "GET /api/v1/redirect/:id",
            GET_STATUSES,
        )
        .await
    }

    /// POST /api/v1/redirect
    pub async fn create(&self, body: &RedirectRequest) -> Result<(), RedirectError> {
        self.send_without_body(
            self.client.post(self.collection_url()).json(body),
            "POST /api/v1/redirect",
            WRITE_STATUSES,
        )
        .await
    }

    /// PUT /api/v1/redirect/{id}
    pub async fn update(&self, id: i64, body: &RedirectRequest) -> Result<(), RedirectError> {
        self.send_without_body(
            self.client.put(self.item_url(id)).json(body),
            "PUT /api/v1/redirect/:id",
            WRITE_STATUSES,
        )
        .await
    }

    /// DELETE /api/v1/redirect/{id}
    pub async fn delete(&self, id: i64) -> Result<(), RedirectError> {
        self.send_without_body(
            self.client.delete(self.item_url(id)),
            "DELETE /api/v1/redirect/:id",
            DELETE_STATUSES,
        )
        .await
    }
}

fn status_error(status: StatusCode, call_name: &str, recognized: &[StatusCode]) -> RedirectError {
    match status {
        StatusCode::UNAUTHORIZED if recognized.contains(&status) => RedirectError::Unauthorized,
        StatusCode::NOT_FOUND if recognized.contains(&status) => RedirectError::NotFound,
        _ => RedirectError::RequestFailed(format!("{call_name} returned {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RedirectForm, StaticToken, TokenError, GENERIC_ERROR_MESSAGE};
    use axum::{
        extract::State,
        http::{HeaderMap, Method, Uri},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    const TOKEN: &str = "Bearer test-token";

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        path: String,
        authorization: Option<String>,
        content_type: Option<String>,
        body: String,
    }

    struct FakeBackend {
        status: StatusCode,
        response_body: String,
        requests: Mutex<Vec<Recorded>>,
    }

    async fn record(
        State(backend): State<Arc<FakeBackend>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        backend.requests.lock().unwrap().push(Recorded {
            method,
            path: uri.path().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            body,
        });
        (backend.status, backend.response_body.clone())
    }

    /// Serve every request with the same canned response and record what arrived.
    async fn spawn_backend(status: StatusCode, response_body: &str) -> (String, Arc<FakeBackend>) {
        let backend = Arc::new(FakeBackend {
            status,
            response_body: response_body.to_string(),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(record)
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), backend)
    }

    fn client(base_url: &str) -> RedirectClient<StaticToken> {
        RedirectClient::new(base_url, StaticToken::new(TOKEN)).unwrap()
    }

    fn only_request(backend: &FakeBackend) -> Recorded {
        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }

    #[tokio::test]
    async fn list_returns_redirects_and_sends_token() {
        let body = json!([
            {"id": 1, "fromPath": "/a", "toUrl": "https://a.example.com", "startsOn": 0, "stopsOn": 0},
            {"id": 2, "fromPath": "/b", "toUrl": "http://b.example.com", "startsOn": 1700000000000i64, "stopsOn": 0}
        ]);
        let (url, backend) = spawn_backend(StatusCode::OK, &body.to_string()).await;

        let redirects = client(&url).list().await.unwrap();

        assert_eq!(redirects.len(), 2);
        assert_eq!(redirects[1].from_path, "/b");
        assert_eq!(redirects[1].starts_on, 1_700_000_000_000);

        let request = only_request(&backend);
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/v1/redirect");
        assert_eq!(request.authorization.as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn list_unauthorized_is_distinct_from_server_error() {
        let (url, _) = spawn_backend(StatusCode::UNAUTHORIZED, "").await;
        let err = client(&url).list().await.unwrap_err();
        assert!(err.is_unauthorized());

        let (url, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let err = client(&url).list().await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
        assert_eq!(err.to_string(), "An error occurred. Please try again.");
    }

    #[tokio::test]
    async fn list_with_unparsable_body_is_generic_error() {
        let (url, _) = spawn_backend(StatusCode::OK, "not json").await;
        let err = client(&url).list().await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn get_returns_single_redirect() {
        let body = json!({"id": 9, "fromPath": "/x", "toUrl": "https://x", "startsOn": 0, "stopsOn": 5});
        let (url, backend) = spawn_backend(StatusCode::OK, &body.to_string()).await;

        let redirect = client(&url).get(9).await.unwrap();

        assert_eq!(redirect.id, 9);
        assert_eq!(redirect.stops_on, 5);
        assert_eq!(only_request(&backend).path, "/api/v1/redirect/9");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (url, _) = spawn_backend(StatusCode::NOT_FOUND, "").await;
        assert!(client(&url).get(9).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn get_unauthorized_is_generic_error() {
        let (url, _) = spawn_backend(StatusCode::UNAUTHORIZED, "").await;
        let err = client(&url).get(9).await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn create_posts_full_body_with_zero_dates() {
        let (url, backend) = spawn_backend(StatusCode::CREATED, "").await;
        let form = RedirectForm {
            from_path: "/old".to_string(),
            to_url: "https://new.example.com".to_string(),
            starts_on: None,
            stops_on: None,
        };

        client(&url)
            .create(&form.submission().unwrap())
            .await
            .unwrap();

        let request = only_request(&backend);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/v1/redirect");
        assert_eq!(request.authorization.as_deref(), Some(TOKEN));
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<Value>(&request.body).unwrap(),
            json!({
                "fromPath": "/old",
                "toUrl": "https://new.example.com",
                "startsOn": 0,
                "stopsOn": 0,
            })
        );
    }

    #[tokio::test]
    async fn create_failure_is_generic_error() {
        let (url, _) = spawn_backend(StatusCode::NOT_FOUND, "").await;
        let body = RedirectRequest {
            from_path: "/old".to_string(),
            to_url: "https://new.example.com".to_string(),
            starts_on: 0,
            stops_on: 0,
        };

        let err = client(&url).create(&body).await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn update_puts_to_item() {
        let (url, backend) = spawn_backend(StatusCode::NO_CONTENT, "").await;
        let body = RedirectRequest {
            from_path: "/old".to_string(),
            to_url: "https://new.example.com".to_string(),
            starts_on: 640_656_000_000,
            stops_on: 0,
        };

        client(&url).update(4, &body).await.unwrap();

        let request = only_request(&backend);
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/api/v1/redirect/4");
        assert_eq!(
            serde_json::from_str::<Value>(&request.body).unwrap()["startsOn"],
            json!(640_656_000_000i64)
        );
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (url, backend) = spawn_backend(StatusCode::NOT_FOUND, "").await;

        let err = client(&url).delete(12).await.unwrap_err();

        assert!(err.is_not_found());
        let request = only_request(&backend);
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/api/v1/redirect/12");
    }

    #[tokio::test]
    async fn delete_server_error_is_generic_error() {
        let (url, _) = spawn_backend(StatusCode::BAD_GATEWAY, "").await;
        let err = client(&url).delete(12).await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_generic_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}")).list().await.unwrap_err();
        assert!(matches!(err, RedirectError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn missing_token_fails_without_request() {
        let (url, backend) = spawn_backend(StatusCode::OK, "[]").await;
        let no_token = || -> Result<Option<String>, TokenError> { Ok(None) };
        let client = RedirectClient::new(&url, no_token).unwrap();

        assert!(client.list().await.unwrap_err().is_unauthorized());
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreadable_token_is_not_unauthorized() {
        let (url, backend) = spawn_backend(StatusCode::OK, "[]").await;
        let unreadable =
            || -> Result<Option<String>, TokenError> { Err(TokenError("permission denied".into())) };
        let client = RedirectClient::new(&url, unreadable).unwrap();

        let err = client.list().await.unwrap_err();
        assert!(!err.is_unauthorized());
        assert!(matches!(err, RedirectError::RequestFailed(_)));
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_tolerates_empty_success_body() {
        let (url, backend) = spawn_backend(StatusCode::NO_CONTENT, "").await;

        client(&url).delete(4).await.unwrap();

        assert_eq!(backend.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn trailing_slash_is_trimmed_and_bad_url_rejected() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.item_url(3), "http://localhost:8080/api/v1/redirect/3");

        assert!(matches!(
            RedirectClient::new("not a url", StaticToken::new(TOKEN)),
            Err(RedirectError::InvalidBaseUrl(_))
        ));
    }
}

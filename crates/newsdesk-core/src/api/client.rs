//! # REST Client
//!
//! HTTP client for the news platform JSON API.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

use super::error::{ApiError, ApiResult};
use super::types::{
    ArticleStatus, Entity, InspectorQuery, LoginRequest, LoginResponse, Record, ResponseFormat,
    StatusChange,
};

/// Address of the news platform backend.
pub const BASE_URL: &str = "http://localhost:8080";

/// Statuses accepted for a creation.
const CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
/// Statuses accepted for reads, updates and partial updates.
const OK: &[StatusCode] = &[StatusCode::OK];
/// Statuses accepted for a deletion.
const DELETED: &[StatusCode] = &[StatusCode::NO_CONTENT];
/// Token revocation answers with a message body rather than 204.
const REVOKED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// HTTP client for the news platform REST API.
///
/// Every entity call carries the session credential as an
/// `Authorization: Bearer` header. The client is cheaply cloneable.
///
/// # Examples
///
/// ```rust,ignore
/// use newsdesk_core::api::{Entity, RestClient};
///
/// let client = RestClient::new("http://localhost:8080")?;
/// let login = client.login("admin", "secret").await?;
/// let users = client.list(Entity::User, &login.token).await?;
/// println!("Found {} users", users.len());
/// ```
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    http: Client,
}

impl RestClient {
    /// Creates a new client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self::with_http(base_url, Client::builder().build()?))
    }

    /// Creates a client sharing an existing HTTP connection pool.
    #[must_use]
    pub fn with_http(base_url: impl Into<String>, http: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying HTTP client, for transports that share its pool.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn segment_url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ==================== Authentication Methods ====================

    /// Exchanges operator credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Credentials rejected (400/401)
    /// * [`ApiError::InvalidResponse`] - Response could not be parsed
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&req)
            .send()
            .await?;
        let res = expect_status(res, OK).await?;

        res.json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    // ==================== Entity Methods ====================

    /// Lists every record of a collection.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Status other than 200
    /// * [`ApiError::InvalidResponse`] - Body is not a JSON array of objects
    pub async fn list(&self, entity: Entity, token: &str) -> ApiResult<Vec<Record>> {
        tracing::debug!(collection = entity.plural(), "GET list");
        let res = self.authorized(self.http.get(self.url(entity.path())), token);
        let res = expect_status(res.send().await?, OK).await?;

        res.json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Not found (404) or other rejection
    /// * [`ApiError::InvalidResponse`] - Body is not a JSON object
    pub async fn get(&self, entity: Entity, id: u64, token: &str) -> ApiResult<Record> {
        let url = self.url(&format!("{}/{}", entity.path(), id));
        let res = self.authorized(self.http.get(url), token).send().await?;
        read_record(expect_status(res, OK).await?).await
    }

    /// Creates a record and returns the backend's view of it.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Validation error or conflict
    /// * [`ApiError::InvalidResponse`] - Body is not a JSON object
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        entity: Entity,
        body: &B,
        token: &str,
    ) -> ApiResult<Record> {
        let res = self
            .authorized(self.http.post(self.url(entity.path())), token)
            .json(body)
            .send()
            .await?;
        read_record(expect_status(res, CREATED).await?).await
    }

    /// Replaces a record.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Not found or validation error
    /// * [`ApiError::InvalidResponse`] - Body is not a JSON object
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        entity: Entity,
        id: u64,
        body: &B,
        token: &str,
    ) -> ApiResult<Record> {
        let url = self.url(&format!("{}/{}", entity.path(), id));
        let res = self
            .authorized(self.http.put(url), token)
            .json(body)
            .send()
            .await?;
        read_record(expect_status(res, OK).await?).await
    }

    /// Deletes a record. Tokens are revoked rather than deleted.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Any status other than the expected one
    pub async fn delete(&self, entity: Entity, id: u64, token: &str) -> ApiResult<()> {
        let url = self.url(&format!("{}/{}", entity.path(), id));
        let res = self.authorized(self.http.delete(url), token).send().await?;
        let accepted = if entity == Entity::Token {
            REVOKED
        } else {
            DELETED
        };
        expect_status(res, accepted).await?;
        Ok(())
    }

    /// Changes the publication status of an article.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Status other than 200
    pub async fn set_article_status(
        &self,
        id: u64,
        status: ArticleStatus,
        token: &str,
    ) -> ApiResult<()> {
        let url = self.url(&format!("{}/{}/status", Entity::Article.path(), id));
        let res = self
            .authorized(self.http.patch(url), token)
            .json(&StatusChange { status })
            .send()
            .await?;
        expect_status(res, OK).await?;
        Ok(())
    }

    // ==================== Inspector Methods ====================

    /// Fetches a raw body from the read-only article service.
    ///
    /// The body is returned verbatim so it can be rendered as JSON or XML.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Backend`] - Unknown category (404) or other rejection
    pub async fn inspect(&self, query: &InspectorQuery, format: ResponseFormat) -> ApiResult<String> {
        let res = self
            .http
            .get(self.segment_url(&query.segments())?)
            .header(reqwest::header::ACCEPT, format.accept())
            .send()
            .await?;
        let res = expect_status(res, OK).await?;

        res.text()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token)
    }
}

/// Turns any status outside `accepted` into [`ApiError::Backend`].
async fn expect_status(res: Response, accepted: &[StatusCode]) -> ApiResult<Response> {
    if accepted.contains(&res.status()) {
        return Ok(res);
    }

    Err(ApiError::Backend {
        status: res.status().as_u16(),
        message: res.text().await.unwrap_or_default(),
    })
}

/// Decodes a single record; an empty body decodes to an empty record.
async fn read_record(res: Response) -> ApiResult<Record> {
    let body = res
        .text()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    if body.trim().is_empty() {
        return Ok(Record::new());
    }

    serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> RestClient {
        RestClient::new(server.uri()).unwrap()
    }

    #[test]
    fn test_backend_address_is_fixed() {
        assert_eq!(BASE_URL, "http://localhost:8080");
        assert_eq!(RestClient::new(BASE_URL).unwrap().base_url(), BASE_URL);
    }

    #[tokio::test]
    async fn test_login_returns_session_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({"username": "admin", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-1", "username": "admin", "role": "ADMIN", "userId": 1
            })))
            .mount(&mock_server)
            .await;

        let login = client(&mock_server).login("admin", "pw").await.unwrap();

        assert_eq!(login.token, "jwt-1");
        assert_eq!(login.user_id, 1);
    }

    #[tokio::test]
    async fn test_login_rejected_is_backend_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid username or password"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).login("admin", "bad").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_list_sends_bearer_credential() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .and(header("authorization", "Bearer jwt-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": 1, "name": "Tech"}])),
            )
            .mount(&mock_server)
            .await;

        let categories = client(&mock_server)
            .list(Entity::Category, "jwt-1")
            .await
            .unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].text("name"), "Tech");
    }

    #[tokio::test]
    async fn test_delete_requires_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/articles/7"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).delete(Entity::Article, 7, "t").await;
        assert!(matches!(result, Err(ApiError::Backend { status: 200, .. })));
    }

    #[tokio::test]
    async fn test_token_revocation_accepts_message_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/tokens/4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&mock_server)
            .await;

        assert!(client(&mock_server).delete(Entity::Token, 4, "t").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_accepts_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_server)
            .await;

        let created = client(&mock_server)
            .create(Entity::Category, &serde_json::json!({"name": "Sport"}), "t")
            .await
            .unwrap();

        assert!(created.fields().is_empty());
    }

    #[tokio::test]
    async fn test_set_article_status_patches() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/articles/5/status"))
            .and(body_json(serde_json::json!({"status": "archived"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .set_article_status(5, ArticleStatus::Archived, "t")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_inspect_sends_accept_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/rest/articles"))
            .and(header("accept", "application/xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<List/>"))
            .mount(&mock_server)
            .await;

        let body = client(&mock_server)
            .inspect(&InspectorQuery::AllArticles, ResponseFormat::Xml)
            .await
            .unwrap();

        assert_eq!(body, "<List/>");
    }

    #[tokio::test]
    async fn test_inspect_encodes_category_as_one_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/rest/articles/category/C"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[\"wrong category\"]"))
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/rest/articles/category/C%23"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[\"C#\"]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/rest/articles/category/A%2FB%3Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[\"A/B?x\"]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);
        let sharp = client
            .inspect(&InspectorQuery::ByCategory("C#".to_string()), ResponseFormat::Json)
            .await
            .unwrap();
        let slashed = client
            .inspect(&InspectorQuery::ByCategory("A/B?x".to_string()), ResponseFormat::Json)
            .await
            .unwrap();

        assert_eq!(sharp, "[\"C#\"]");
        assert_eq!(slashed, "[\"A/B?x\"]");
    }

    #[test]
    fn test_segment_url_keeps_base_path() {
        let client = RestClient::with_http("http://news.test/backend/", Client::new());
        let url = client.segment_url(&["api", "rest", "articles", "category", "World News"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://news.test/backend/api/rest/articles/category/World%20News"
        );
    }
}

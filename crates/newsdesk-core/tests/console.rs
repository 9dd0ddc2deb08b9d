//! End-to-end tests for the admin console: login rules, client-side guards
//! and the REST-only entity operations.

use newsdesk_core::api::{
    ArticleDraft, ArticleStatus, InspectorQuery, Record, ResponseFormat, RestClient, UserDraft,
};
use newsdesk_core::{render, AdminConsole, AdminError, AuthFailure, Listing, Style};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn console(server: &MockServer) -> AdminConsole {
    AdminConsole::new(RestClient::new(server.uri()).unwrap())
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt",
            "username": "admin",
            "role": role,
            "userId": 1
        })))
        .mount(server)
        .await;

    // No RPC service: every call goes to REST.
    Mock::given(method("GET"))
        .and(path("/soap/users"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer) -> AdminConsole {
    mount_login(server, "ADMIN").await;
    let mut console = console(server);
    console.login("admin", "secret").await.unwrap();
    console
}

fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

// ==================== Login ====================

#[tokio::test]
async fn test_login_opens_session() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    let session = console.session().unwrap();
    assert_eq!(session.token(), "jwt");
    assert_eq!(session.operator().username, "admin");
    assert_eq!(session.operator().id, 1);
    assert!(!console.rpc_available());
}

#[tokio::test]
async fn test_login_rejects_non_administrator() {
    let server = MockServer::start().await;
    mount_login(&server, "EDITOR").await;
    let mut console = console(&server);

    let err = console.login("admin", "secret").await.unwrap_err();

    assert!(matches!(
        err,
        AdminError::Authentication(AuthFailure::NotAdministrator)
    ));
    assert!(console.session().is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid username or password"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/soap/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut console = console(&server);
    let err = console.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(
        err,
        AdminError::Authentication(AuthFailure::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_blank_login_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut console = console(&server);
    let err = console.login("   ", "secret").await.unwrap_err();
    assert!(matches!(err, AdminError::Validation(_)));
}

#[tokio::test]
async fn test_logout_drops_session() {
    let server = MockServer::start().await;
    let mut console = logged_in(&server).await;

    console.logout();

    assert!(console.session().is_none());
    assert!(matches!(
        console.list_tokens().await,
        Err(AdminError::Authentication(AuthFailure::NotLoggedIn))
    ));
}

// ==================== Client-side Guards ====================

#[tokio::test]
async fn test_category_with_articles_is_not_deleted() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let articles = Listing::new(records(json!([
        {"id": 1, "title": "Rates rise", "categoryName": "Economy"},
        {"id": 2, "title": "Cup final", "categoryName": "Sport"}
    ])));
    let category = records(json!([{"id": 4, "name": "Economy"}])).remove(0);

    let err = console
        .delete_category(&category, &articles)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::Validation(_)));
    assert!(err.to_string().contains("Economy"));
}

#[tokio::test]
async fn test_empty_category_is_deleted() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/5"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let category = records(json!([{"id": 5, "name": "Culture"}])).remove(0);
    console
        .delete_category(&category, &Listing::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_user_draft_sends_nothing() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let draft = UserDraft {
        username: "nomail".to_string(),
        password: "pw".to_string(),
        ..UserDraft::default()
    };

    let err = console.create_user(&draft).await.unwrap_err();
    assert!(err.is_client_side());
}

// ==================== Entities ====================

#[tokio::test]
async fn test_create_article_is_authored_by_operator() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .and(body_partial_json(json!({
            "title": "Budget (Copy)",
            "status": "draft",
            "authorId": 1,
            "categoryName": "Economy"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let original = records(json!([
        {"id": 3, "title": "Budget", "status": "published", "categoryName": "Economy"}
    ]))
    .remove(0);

    let created = console
        .create_article(&ArticleDraft::duplicate_of(&original))
        .await
        .unwrap();
    assert_eq!(created.id(), Some(12));
}

#[tokio::test]
async fn test_set_article_status_patches() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/articles/5/status"))
        .and(body_json(json!({"status": "archived"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    console
        .set_article_status(5, ArticleStatus::Archived)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_revoke_token_accepts_message_body() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/tokens/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "revoked"})))
        .expect(1)
        .mount(&server)
        .await;

    console.revoke_token(2).await.unwrap();
}

#[tokio::test]
async fn test_dashboard_counts_failed_lists_as_zero() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "active": true},
            {"id": 2, "active": false}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;

    let stats = console.dashboard_stats().await.unwrap();

    assert_eq!(stats.users, 2);
    assert_eq!(stats.active_users, 1);
    assert_eq!(stats.articles, 0);
    assert_eq!(stats.categories, 1);
}

// ==================== Inspector ====================

#[tokio::test]
async fn test_inspect_category_as_xml() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/rest/articles/category/Sport"))
        .and(header("accept", "application/xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<List><item><title>Cup final</title></item></List>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = console
        .inspect(
            &InspectorQuery::ByCategory("Sport".to_string()),
            ResponseFormat::Xml,
        )
        .await
        .unwrap();

    let rendered = render(&body, ResponseFormat::Xml);
    assert_eq!(
        rendered.text,
        "<List>\n  <item>\n    <title>Cup final</title>\n  </item>\n</List>"
    );
    assert!(rendered.tokens(Style::Tag).contains(&"<title>"));
}

#[tokio::test]
async fn test_inspect_unknown_category_fails() {
    let server = MockServer::start().await;
    let console = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/rest/articles/category/Nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = console
        .inspect(
            &InspectorQuery::ByCategory("Nope".to_string()),
            ResponseFormat::Json,
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("inspect /api/rest/articles/category/Nope"));
}

//! # API Types
//!
//! Types for requests and responses exchanged with the news platform backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==================== Records ====================

/// A loosely-typed entity returned by the backend.
///
/// Users, articles, categories and tokens all arrive as plain field maps.
/// The client only reads the fields it displays and never enforces a schema.
/// Values decoded from the RPC transport are always strings, so the typed
/// accessors accept both JSON scalars and their textual form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Removes a field.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns all fields in backend order.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Numeric identifier of the entity.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.number("id")
    }

    /// Reads a field as an unsigned integer (JSON number or numeric string).
    #[must_use]
    pub fn number(&self, field: &str) -> Option<u64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads a field as display text. Missing and null fields read as empty.
    #[must_use]
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Reads `primary`, or `fallback` when `primary` is absent or empty.
    #[must_use]
    pub fn text_or(&self, primary: &str, fallback: &str) -> String {
        let value = self.text(primary);
        if value.is_empty() {
            self.text(fallback)
        } else {
            value
        }
    }

    /// Reads a boolean flag. Missing fields read as `false`.
    #[must_use]
    pub fn flag(&self, field: &str) -> bool {
        match self.0.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Entity collections managed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// `/api/users`
    User,
    /// `/api/articles`
    Article,
    /// `/api/categories`
    Category,
    /// `/api/tokens`
    Token,
}

impl Entity {
    /// Collection path below the base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::User => "/api/users",
            Self::Article => "/api/articles",
            Self::Category => "/api/categories",
            Self::Token => "/api/tokens",
        }
    }

    /// Singular noun used in operation names.
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Article => "article",
            Self::Category => "category",
            Self::Token => "token",
        }
    }

    /// Plural noun used in operation names.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Article => "articles",
            Self::Category => "categories",
            Self::Token => "tokens",
        }
    }
}

// ==================== Authentication Types ====================

/// Operator role as named by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administration rights; the only role allowed in this client.
    Admin,
    /// Can write articles.
    Editor,
    /// Read-only account.
    #[default]
    Visitor,
}

impl Role {
    /// Parses the backend's role name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "EDITOR" => Some(Self::Editor),
            "VISITOR" => Some(Self::Visitor),
            _ => None,
        }
    }

    /// Backend name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Visitor => "VISITOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Operator username.
    pub username: String,
    /// Operator password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer credential for subsequent calls.
    pub token: String,
    /// Canonical username.
    pub username: String,
    /// Role of the authenticated user.
    pub role: Role,
    /// Numeric user id.
    pub user_id: u64,
}

// ==================== Write Payloads ====================

/// Create/update payload for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Login name (required).
    pub username: String,
    /// Email address (required).
    pub email: String,
    /// Password; required on creation, left out of the payload when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role granted to the user.
    pub role: Role,
    /// Whether the account is enabled.
    pub active: bool,
}

impl UserDraft {
    /// Prefills a draft for editing an existing user.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            username: record.text("username"),
            email: record.text("email"),
            password: String::new(),
            first_name: record.text("firstName"),
            last_name: record.text("lastName"),
            role: Role::parse(&record.text("role")).unwrap_or_default(),
            active: record.flag("active"),
        }
    }

    /// Prefills a draft for a copy of an existing user.
    ///
    /// The copy gets a derived username and no email, so it cannot be
    /// submitted until the operator supplies one.
    #[must_use]
    pub fn duplicate_of(record: &Record) -> Self {
        Self {
            username: format!("{}_copy", record.text("username")),
            email: String::new(),
            ..Self::from_record(record)
        }
    }

    /// Checks required fields. `creating` additionally requires a password.
    pub fn validate(&self, creating: bool) -> Result<(), String> {
        if self.username.trim().is_empty() || self.email.trim().is_empty() {
            return Err("Username and email are required".to_string());
        }
        if creating && self.password.is_empty() {
            return Err("A password is required for a new user".to_string());
        }
        Ok(())
    }
}

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Not yet visible to readers.
    #[default]
    Draft,
    /// Visible to readers.
    Published,
    /// Withdrawn from the public listing.
    Archived,
}

impl ArticleStatus {
    /// Parses a status name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Status of a record, from `status` or the `published` flag.
    #[must_use]
    pub fn of(record: &Record) -> Self {
        Self::parse(&record.text("status")).unwrap_or(if record.flag("published") {
            Self::Published
        } else {
            Self::Draft
        })
    }

    /// Wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// Body of a status change request.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    /// Target status.
    pub status: ArticleStatus,
}

/// Create/update payload for an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    /// Headline (required).
    pub title: String,
    /// Short abstract.
    pub summary: String,
    /// Body text.
    pub content: String,
    /// Name of the category the article is filed under.
    pub category_name: String,
    /// Publication state.
    pub status: ArticleStatus,
    /// Author; set from the session when submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
}

impl ArticleDraft {
    /// Prefills a draft for editing an existing article.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.text("title"),
            summary: record.text("summary"),
            content: record.text("content"),
            category_name: record.text_or("categoryName", "category"),
            status: ArticleStatus::of(record),
            author_id: None,
        }
    }

    /// Prefills a draft for a copy of an existing article, always as a draft.
    #[must_use]
    pub fn duplicate_of(record: &Record) -> Self {
        let mut draft = Self::from_record(record);
        draft.title = format!("{} (Copy)", draft.title);
        draft.status = ArticleStatus::Draft;
        draft
    }

    /// Checks required fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("The title is required".to_string());
        }
        Ok(())
    }
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDraft {
    /// Unique category name (required).
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl CategoryDraft {
    /// Prefills a draft for editing an existing category.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("name"),
            description: record.text("description"),
        }
    }

    /// Checks required fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The name is required".to_string());
        }
        Ok(())
    }
}

/// Request to generate an API token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// What the token is for (required).
    pub description: String,
    /// Lifetime in days.
    pub validity_days: u32,
}

impl Default for TokenRequest {
    fn default() -> Self {
        Self {
            description: String::new(),
            validity_days: 30,
        }
    }
}

impl TokenRequest {
    /// Checks required fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("The description is required".to_string());
        }
        if self.validity_days == 0 {
            return Err("The validity must be at least one day".to_string());
        }
        Ok(())
    }
}

// ==================== Inspector Types ====================

/// Representation requested from the read-only article service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `application/json`
    #[default]
    Json,
    /// `application/xml`
    Xml,
}

impl ResponseFormat {
    /// Value for the `Accept` header.
    #[must_use]
    pub fn accept(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Xml => f.write_str("XML"),
        }
    }
}

/// Query against the read-only `/api/rest/articles` family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorQuery {
    /// All published articles.
    AllArticles,
    /// Published articles of one category, by name.
    ByCategory(String),
    /// Published articles grouped by category name.
    Grouped,
}

impl InspectorQuery {
    /// Path segments below the base URL. A category name is one segment,
    /// whatever characters it holds.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec!["api", "rest", "articles"];
        match self {
            Self::AllArticles => {}
            Self::ByCategory(name) => segments.extend(["category", name.as_str()]),
            Self::Grouped => segments.push("grouped"),
        }
        segments
    }

    /// Human-readable path, for logs and messages. Not percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_accessors_accept_text_values() {
        let rec = record(json!({"id": "7", "active": "true", "name": null}));

        assert_eq!(rec.id(), Some(7));
        assert!(rec.flag("active"));
        assert_eq!(rec.text("name"), "");
        assert_eq!(rec.text("missing"), "");
    }

    #[test]
    fn test_record_text_or_falls_back_on_empty() {
        let rec = record(json!({"categoryName": "", "category": "Sport"}));
        assert_eq!(rec.text_or("categoryName", "category"), "Sport");
    }

    #[test]
    fn test_user_draft_omits_empty_password() {
        let draft = UserDraft {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Editor,
            ..UserDraft::default()
        };

        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["firstName"], "");
        assert_eq!(body["role"], "EDITOR");
    }

    #[test]
    fn test_user_draft_requires_password_only_on_creation() {
        let draft = UserDraft {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            ..UserDraft::default()
        };

        assert!(draft.validate(false).is_ok());
        assert!(draft.validate(true).is_err());
    }

    #[test]
    fn test_user_duplicate_clears_email() {
        let rec = record(json!({
            "id": 3, "username": "carol", "email": "c@example.com",
            "role": "ADMIN", "active": true
        }));
        let copy = UserDraft::duplicate_of(&rec);

        assert_eq!(copy.username, "carol_copy");
        assert!(copy.email.is_empty());
        assert_eq!(copy.role, Role::Admin);
        assert!(copy.validate(true).is_err());
    }

    #[test]
    fn test_article_duplicate_is_a_draft() {
        let rec = record(json!({"id": 9, "title": "Launch", "status": "published"}));
        let copy = ArticleDraft::duplicate_of(&rec);

        assert_eq!(copy.title, "Launch (Copy)");
        assert_eq!(copy.status, ArticleStatus::Draft);
    }

    #[test]
    fn test_article_status_from_published_flag() {
        let rec = record(json!({"published": true}));
        assert_eq!(ArticleStatus::of(&rec), ArticleStatus::Published);
    }

    #[test]
    fn test_token_request_serialization() {
        let req = TokenRequest {
            description: "CI".to_string(),
            validity_days: 7,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"description": "CI", "validityDays": 7}));
    }

    #[test]
    fn test_inspector_paths() {
        assert_eq!(InspectorQuery::Grouped.path(), "/api/rest/articles/grouped");
        assert_eq!(
            InspectorQuery::ByCategory("Tech".to_string()).path(),
            "/api/rest/articles/category/Tech"
        );
        assert_eq!(
            InspectorQuery::ByCategory("A/B".to_string()).segments(),
            vec!["api", "rest", "articles", "category", "A/B"]
        );
    }

    #[test]
    fn test_login_response_deserialization() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "jwt", "username": "admin", "role": "ADMIN", "userId": 1
        }))
        .unwrap();

        assert_eq!(resp.role, Role::Admin);
        assert_eq!(resp.user_id, 1);
    }
}

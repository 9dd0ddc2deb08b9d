//! # Admin Console
//!
//! Facade over both transports and the session. Every user interface action
//! goes through [`AdminConsole`].

use std::sync::Arc;

use crate::api::{
    ApiError, ArticleDraft, ArticleStatus, CategoryDraft, Entity, InspectorQuery, Record,
    ResponseFormat, RestClient, Role, TokenRequest, UserDraft,
};
use crate::error::{AdminError, AdminResult, AuthFailure};
use crate::listing::{DashboardStats, Listing};
use crate::rpc::RpcClient;
use crate::session::Session;
use crate::transport::{rest_only, Operation, TransportSelector};

struct LiveSession {
    session: Session,
    transports: TransportSelector,
}

/// The administration client.
///
/// Cloning is cheap and clones share the open session; logging in or out
/// on one clone does not affect the others.
#[derive(Clone)]
pub struct AdminConsole {
    rest: RestClient,
    live: Option<Arc<LiveSession>>,
}

impl AdminConsole {
    /// Creates a logged-out console for the given backend.
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest, live: None }
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.live.as_ref().map(|live| &live.session)
    }

    /// Whether the RPC transport is used in the open session.
    #[must_use]
    pub fn rpc_available(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.transports.rpc_available())
    }

    fn live(&self) -> AdminResult<&LiveSession> {
        self.live
            .as_deref()
            .ok_or(AdminError::Authentication(AuthFailure::NotLoggedIn))
    }

    // ==================== Session ====================

    /// Opens a session.
    ///
    /// The REST verdict decides; the RPC service is then located and asked to
    /// confirm the credentials. An explicit RPC rejection refuses the login,
    /// while any RPC error only disables the RPC transport for the session.
    ///
    /// # Errors
    ///
    /// * [`AdminError::Validation`] - Empty username or password
    /// * [`AdminError::Authentication`] - Rejected, or not an administrator
    /// * [`AdminError::Failed`] - Backend unreachable
    pub async fn login(&mut self, username: &str, password: &str) -> AdminResult<&Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AdminError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let login = match self.rest.login(username, password).await {
            Ok(login) => login,
            Err(ApiError::Backend { status, .. }) => {
                tracing::info!(username, status, "login rejected");
                return Err(AuthFailure::InvalidCredentials.into());
            }
            Err(source) => {
                return Err(AdminError::Failed {
                    operation: Operation::Login,
                    source,
                })
            }
        };

        if login.role != Role::Admin {
            tracing::info!(username, role = %login.role, "login refused for non-administrator");
            return Err(AuthFailure::NotAdministrator.into());
        }

        let session = Session::from(login);
        let rpc = match RpcClient::connect(self.rest.http().clone(), self.rest.base_url(), session.token())
            .await
        {
            Ok(rpc) => Some(rpc),
            Err(e) => {
                tracing::warn!(error = %e, "RPC transport unavailable for this session");
                None
            }
        };

        if let Some(rpc) = &rpc {
            match rpc.authenticate_user(username, password).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!(username, "login rejected by RPC service");
                    return Err(AuthFailure::InvalidCredentials.into());
                }
                Err(e) => tracing::warn!(error = %e, "RPC authentication skipped"),
            }
        }

        tracing::info!(username, rpc = rpc.is_some(), "logged in");
        let live = self.live.insert(Arc::new(LiveSession {
            session,
            transports: TransportSelector::new(self.rest.clone(), rpc),
        }));
        Ok(&live.session)
    }

    /// Closes the session and drops the RPC client.
    pub fn logout(&mut self) {
        if let Some(live) = self.live.take() {
            tracing::info!(username = %live.session.operator().username, "logged out");
        }
    }

    // ==================== Users ====================

    /// Lists users, RPC first.
    ///
    /// # Errors
    ///
    /// Not logged in, or both transports failed.
    pub async fn list_users(&self) -> AdminResult<Vec<Record>> {
        let live = self.live()?;
        live.transports.list_users(&live.session).await
    }

    /// Fetches one user over REST.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn get_user(&self, id: u64) -> AdminResult<Record> {
        self.get(Entity::User, id).await
    }

    /// Creates a user, RPC first.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or both transports failed.
    pub async fn create_user(&self, draft: &UserDraft) -> AdminResult<Record> {
        draft.validate(true).map_err(AdminError::Validation)?;
        let live = self.live()?;
        let created = live.transports.create_user(&live.session, draft).await?;
        tracing::info!(username = %draft.username, "user created");
        Ok(created)
    }

    /// Updates a user, RPC first.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or both transports failed.
    pub async fn update_user(&self, id: u64, draft: &UserDraft) -> AdminResult<Record> {
        draft.validate(false).map_err(AdminError::Validation)?;
        let live = self.live()?;
        let updated = live.transports.update_user(&live.session, id, draft).await?;
        tracing::info!(id, "user updated");
        Ok(updated)
    }

    /// Deletes a user, RPC first.
    ///
    /// # Errors
    ///
    /// Not logged in, or both transports failed.
    pub async fn delete_user(&self, id: u64) -> AdminResult<()> {
        let live = self.live()?;
        live.transports.delete_user(&live.session, id).await?;
        tracing::info!(id, "user deleted");
        Ok(())
    }

    // ==================== Articles ====================

    /// Lists articles.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn list_articles(&self) -> AdminResult<Vec<Record>> {
        self.list(Entity::Article).await
    }

    /// Fetches one article.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn get_article(&self, id: u64) -> AdminResult<Record> {
        self.get(Entity::Article, id).await
    }

    /// Creates an article authored by the operator.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or the request failed.
    pub async fn create_article(&self, draft: &ArticleDraft) -> AdminResult<Record> {
        draft.validate().map_err(AdminError::Validation)?;
        let live = self.live()?;
        let draft = ArticleDraft {
            author_id: Some(live.session.operator().id),
            ..draft.clone()
        };
        self.create(Entity::Article, &draft).await
    }

    /// Replaces an article.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or the request failed.
    pub async fn update_article(&self, id: u64, draft: &ArticleDraft) -> AdminResult<Record> {
        draft.validate().map_err(AdminError::Validation)?;
        self.update(Entity::Article, id, draft).await
    }

    /// Publishes, archives or reverts an article to draft.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn set_article_status(&self, id: u64, status: ArticleStatus) -> AdminResult<()> {
        let live = self.live()?;
        rest_only(
            &Operation::SetStatus(id, status),
            live.transports
                .rest()
                .set_article_status(id, status, live.session.token()),
        )
        .await?;
        tracing::info!(id, status = status.as_str(), "article status changed");
        Ok(())
    }

    /// Deletes an article.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn delete_article(&self, id: u64) -> AdminResult<()> {
        self.delete(Entity::Article, id).await
    }

    // ==================== Categories ====================

    /// Lists categories.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn list_categories(&self) -> AdminResult<Vec<Record>> {
        self.list(Entity::Category).await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or the request failed.
    pub async fn create_category(&self, draft: &CategoryDraft) -> AdminResult<Record> {
        draft.validate().map_err(AdminError::Validation)?;
        self.create(Entity::Category, draft).await
    }

    /// Replaces a category.
    ///
    /// # Errors
    ///
    /// Invalid draft, not logged in, or the request failed.
    pub async fn update_category(&self, id: u64, draft: &CategoryDraft) -> AdminResult<Record> {
        draft.validate().map_err(AdminError::Validation)?;
        self.update(Entity::Category, id, draft).await
    }

    /// Deletes a category that has no articles in the cached article listing.
    ///
    /// # Errors
    ///
    /// * [`AdminError::Validation`] - Category still has articles, or no id
    /// * Otherwise not logged in, or the request failed
    pub async fn delete_category(&self, category: &Record, articles: &Listing) -> AdminResult<()> {
        let name = category.text("name");
        let count = articles.article_count(&name);
        if count > 0 {
            return Err(AdminError::Validation(format!(
                "Category '{name}' still has {count} article(s)"
            )));
        }
        let id = category
            .id()
            .ok_or_else(|| AdminError::Validation("Category has no id".to_string()))?;

        self.delete(Entity::Category, id).await
    }

    // ==================== Tokens ====================

    /// Lists API tokens.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn list_tokens(&self) -> AdminResult<Vec<Record>> {
        self.list(Entity::Token).await
    }

    /// Fetches one token, with its full value.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn get_token(&self, id: u64) -> AdminResult<Record> {
        self.get(Entity::Token, id).await
    }

    /// Generates a token.
    ///
    /// # Errors
    ///
    /// Invalid request, not logged in, or the request failed.
    pub async fn create_token(&self, request: &TokenRequest) -> AdminResult<Record> {
        request.validate().map_err(AdminError::Validation)?;
        self.create(Entity::Token, request).await
    }

    /// Revokes a token.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn revoke_token(&self, id: u64) -> AdminResult<()> {
        self.delete(Entity::Token, id).await
    }

    // ==================== Inspector ====================

    /// Reads the public article service and returns the raw body.
    ///
    /// # Errors
    ///
    /// Not logged in, or the request failed.
    pub async fn inspect(&self, query: &InspectorQuery, format: ResponseFormat) -> AdminResult<String> {
        let live = self.live()?;
        rest_only(
            &Operation::Inspect(query.clone()),
            live.transports.rest().inspect(query, format),
        )
        .await
    }

    // ==================== Dashboard ====================

    /// Collection counters. A collection that fails to load counts as zero.
    ///
    /// # Errors
    ///
    /// Only when not logged in.
    pub async fn dashboard_stats(&self) -> AdminResult<DashboardStats> {
        self.live()?;

        let users = or_empty(self.list_users().await);
        let articles = or_empty(self.list_articles().await);
        let categories = or_empty(self.list_categories().await);

        Ok(DashboardStats {
            users: users.len(),
            active_users: users.iter().filter(|u| u.flag("active")).count(),
            articles: articles.len(),
            categories: categories.len(),
        })
    }

    // ==================== REST helpers ====================

    async fn list(&self, entity: Entity) -> AdminResult<Vec<Record>> {
        let live = self.live()?;
        rest_only(
            &Operation::List(entity),
            live.transports.rest().list(entity, live.session.token()),
        )
        .await
    }

    async fn get(&self, entity: Entity, id: u64) -> AdminResult<Record> {
        let live = self.live()?;
        rest_only(
            &Operation::Get(entity, id),
            live.transports.rest().get(entity, id, live.session.token()),
        )
        .await
    }

    async fn create<B: serde::Serialize + ?Sized>(&self, entity: Entity, body: &B) -> AdminResult<Record> {
        let live = self.live()?;
        let record = rest_only(
            &Operation::Create(entity),
            live.transports.rest().create(entity, body, live.session.token()),
        )
        .await?;
        tracing::info!(entity = entity.singular(), id = ?record.id(), "created");
        Ok(record)
    }

    async fn update<B: serde::Serialize + ?Sized>(
        &self,
        entity: Entity,
        id: u64,
        body: &B,
    ) -> AdminResult<Record> {
        let live = self.live()?;
        let record = rest_only(
            &Operation::Update(entity, id),
            live.transports
                .rest()
                .update(entity, id, body, live.session.token()),
        )
        .await?;
        tracing::info!(entity = entity.singular(), id, "updated");
        Ok(record)
    }

    async fn delete(&self, entity: Entity, id: u64) -> AdminResult<()> {
        let live = self.live()?;
        rest_only(
            &Operation::Delete(entity, id),
            live.transports.rest().delete(entity, id, live.session.token()),
        )
        .await?;
        tracing::info!(entity = entity.singular(), id, "deleted");
        Ok(())
    }
}

fn or_empty(result: AdminResult<Vec<Record>>) -> Vec<Record> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard counter unavailable");
        Vec::new()
    })
}

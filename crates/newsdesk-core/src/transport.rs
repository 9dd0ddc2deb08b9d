//! # Transport Selection
//!
//! Runs entity operations over the preferred RPC transport with a single
//! REST fallback.
//!
//! ## Policy
//!
//! 1. If the session has an RPC client, call it with the session credential.
//! 2. On any RPC error (network, protocol, remote fault), or when the session
//!    never obtained an RPC client, call REST once with the same parameters
//!    and the same bearer credential.
//! 3. If REST fails too, the operation fails. Nothing is retried further.
//!
//! A successful RPC reply is authoritative, including an empty list.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;

use crate::api::{ApiError, ApiResult, ArticleStatus, Entity, InspectorQuery, Record, RestClient, UserDraft};
use crate::error::{AdminError, AdminResult};
use crate::rpc::{RpcClient, RpcResult};
use crate::session::Session;

/// A named backend operation, used in logs and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Credential exchange.
    Login,
    /// Fetch a whole collection.
    List(Entity),
    /// Fetch one record.
    Get(Entity, u64),
    /// Create a record.
    Create(Entity),
    /// Replace a record.
    Update(Entity, u64),
    /// Delete (or revoke) a record.
    Delete(Entity, u64),
    /// Change an article's publication status.
    SetStatus(u64, ArticleStatus),
    /// Raw read from the article service.
    Inspect(InspectorQuery),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::List(entity) => write!(f, "list {}", entity.plural()),
            Self::Get(entity, id) => write!(f, "get {} #{id}", entity.singular()),
            Self::Create(entity) => write!(f, "create {}", entity.singular()),
            Self::Update(entity, id) => write!(f, "update {} #{id}", entity.singular()),
            Self::Delete(Entity::Token, id) => write!(f, "revoke token #{id}"),
            Self::Delete(entity, id) => write!(f, "delete {} #{id}", entity.singular()),
            Self::SetStatus(id, status) => {
                write!(f, "set article #{id} status to {}", status.as_str())
            }
            Self::Inspect(query) => write!(f, "inspect {}", query.path()),
        }
    }
}

/// Outcome of one step of the fallback policy.
///
/// `R` is the payload of [`Attempt::RpcUnavailable`]. Once REST has been
/// tried it is [`Infallible`], so a settled attempt can only be an answer or
/// a REST failure.
#[derive(Debug)]
pub enum Attempt<T, R = String> {
    /// The step produced the answer.
    Ok(T),
    /// RPC could not answer; REST should be tried.
    RpcUnavailable(R),
    /// REST could not answer; the operation has failed.
    Failed(ApiError),
}

impl<T> Attempt<T> {
    async fn rpc<F>(call: Option<F>) -> Self
    where
        F: Future<Output = RpcResult<T>>,
    {
        let Some(call) = call else {
            return Self::RpcUnavailable("no RPC transport for this session".to_string());
        };

        match call.await {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::RpcUnavailable(e.to_string()),
        }
    }
}

impl<T> Attempt<T, Infallible> {
    async fn rest<F, Fut>(call: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match call().await {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Failed(e),
        }
    }

    /// Settles the final attempt into a console result.
    pub fn settle(self, operation: &Operation) -> AdminResult<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Failed(source) => {
                tracing::warn!(%operation, error = %source, "operation failed");
                Err(AdminError::Failed {
                    operation: operation.clone(),
                    source,
                })
            }
            Self::RpcUnavailable(never) => match never {},
        }
    }
}

/// Runs `rpc` (if any), falling back to `rest` exactly once.
///
/// `rest` is only invoked when the RPC step did not produce an answer.
pub async fn with_fallback<T, R, F, Fut>(
    operation: &Operation,
    rpc: Option<R>,
    rest: F,
) -> AdminResult<T>
where
    R: Future<Output = RpcResult<T>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let settled = match Attempt::<T>::rpc(rpc).await {
        Attempt::Ok(value) => Attempt::Ok(value),
        Attempt::Failed(source) => Attempt::Failed(source),
        Attempt::RpcUnavailable(reason) => {
            tracing::warn!(%operation, %reason, "RPC unavailable, falling back to REST");
            Attempt::<T, Infallible>::rest(rest).await
        }
    };

    settled.settle(operation)
}

/// Runs a REST-only operation.
pub async fn rest_only<T, Fut>(operation: &Operation, call: Fut) -> AdminResult<T>
where
    Fut: Future<Output = ApiResult<T>>,
{
    Attempt::<T, Infallible>::rest(|| call).await.settle(operation)
}

/// The transports available to one session.
///
/// The RPC client is decided once at login: when its service description
/// could not be fetched, every call of the session goes straight to REST.
#[derive(Clone)]
pub struct TransportSelector {
    rest: RestClient,
    rpc: Option<RpcClient>,
}

impl TransportSelector {
    /// Creates a selector. Pass `None` when RPC construction failed.
    #[must_use]
    pub fn new(rest: RestClient, rpc: Option<RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Whether RPC is attempted in this session.
    #[must_use]
    pub fn rpc_available(&self) -> bool {
        self.rpc.is_some()
    }

    /// The REST transport.
    #[must_use]
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Lists users, RPC first.
    pub async fn list_users(&self, session: &Session) -> AdminResult<Vec<Record>> {
        with_fallback(
            &Operation::List(Entity::User),
            self.rpc.as_ref().map(RpcClient::list_users),
            || self.rest.list(Entity::User, session.token()),
        )
        .await
    }

    /// Creates a user, RPC first.
    pub async fn create_user(&self, session: &Session, draft: &UserDraft) -> AdminResult<Record> {
        with_fallback(
            &Operation::Create(Entity::User),
            self.rpc.as_ref().map(|rpc| rpc.add_user(draft)),
            || self.rest.create(Entity::User, draft, session.token()),
        )
        .await
    }

    /// Updates a user, RPC first.
    pub async fn update_user(
        &self,
        session: &Session,
        id: u64,
        draft: &UserDraft,
    ) -> AdminResult<Record> {
        with_fallback(
            &Operation::Update(Entity::User, id),
            self.rpc.as_ref().map(|rpc| rpc.update_user(id, draft)),
            || self.rest.update(Entity::User, id, draft, session.token()),
        )
        .await
    }

    /// Deletes a user, RPC first.
    pub async fn delete_user(&self, session: &Session, id: u64) -> AdminResult<()> {
        with_fallback(
            &Operation::Delete(Entity::User, id),
            self.rpc.as_ref().map(|rpc| rpc.delete_user(id)),
            || self.rest.delete(Entity::User, id, session.token()),
        )
        .await
    }
}

//! # REST API
//!
//! JSON/REST transport for the news platform backend.
//!
//! This module provides the [`RestClient`] and the loosely-typed [`Record`]
//! every entity is decoded into, plus the typed write payloads.

mod client;
mod error;
mod types;

pub use client::{RestClient, BASE_URL};
pub use error::{ApiError, ApiResult};
pub use types::{
    ArticleDraft, ArticleStatus, CategoryDraft, Entity, InspectorQuery, LoginRequest,
    LoginResponse, Record, ResponseFormat, Role, StatusChange, TokenRequest, UserDraft,
};

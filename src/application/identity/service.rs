//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use super::message::{field_violations, MessageResult, Violation};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserPayload};

/// What the id of a create/update payload must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// Create: an id, if given, must not be taken yet.
    MustBeNew,
    /// Update: an id must be given and must already exist.
    MustExist,
}

/// User service. Validates payloads and coordinates the User and Role
/// stores.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user. Rejections come back as an unsuccessful
    /// [`MessageResult`]; only store faults are errors.
    pub async fn create(&self, payload: UserPayload) -> DomainResult<MessageResult> {
        self.validate_and_save(payload, IdRule::MustBeNew).await
    }

    /// Overwrite every field of an existing user, roles included.
    pub async fn update(&self, payload: UserPayload) -> DomainResult<MessageResult> {
        self.validate_and_save(payload, IdRule::MustExist).await
    }

    /// Delete a user by the id carried in the payload.
    pub async fn delete(&self, payload: UserPayload) -> DomainResult<()> {
        let id = payload.id.ok_or(DomainError::MissingId)?;

        if self.repos.users().find_one(id).await?.is_none() {
            warn!(user_id = id, "Delete requested for unknown user");
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }

        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Look up the user whose id the payload carries. An unknown id is not an
    /// error and yields `None`.
    pub async fn fetch(&self, payload: UserPayload) -> DomainResult<Option<User>> {
        let id = payload.id.ok_or(DomainError::MissingId)?;
        self.repos.users().find_one(id).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    // ── Validation ──────────────────────────────────────────────

    /// Collect every violation of the payload: field rules first, then one
    /// entry per unknown role in input order, then the id rule.
    pub async fn validate(&self, payload: &UserPayload, rule: IdRule) -> DomainResult<Vec<Violation>> {
        let mut violations = match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_violations(&errors),
        };

        for role_id in payload.role_ids() {
            if !self.repos.roles().exists(role_id).await? {
                violations.push(Violation::role_not_exist(role_id));
            }
        }

        let stored = match payload.id {
            Some(id) => self.repos.users().find_one(id).await?.is_some(),
            None => false,
        };
        match rule {
            IdRule::MustBeNew if stored => violations.push(Violation::user_exists()),
            IdRule::MustExist if !stored => violations.push(Violation::user_not_exists()),
            _ => {}
        }

        Ok(violations)
    }

    async fn validate_and_save(&self, payload: UserPayload, rule: IdRule) -> DomainResult<MessageResult> {
        let violations = self.validate(&payload, rule).await?;
        if !violations.is_empty() {
            debug!(
                ?rule,
                user_id = ?payload.id,
                violations = violations.len(),
                "User payload rejected"
            );
            return Ok(MessageResult::rejected(&violations));
        }

        let saved = self.repos.users().save(payload.into_record()).await?;
        info!(user_id = saved.id, login = %saved.login, ?rule, "User saved");
        Ok(MessageResult::ok())
    }
}

// ── Tests ──────────────────────────────────────────────────────

//! MongoDB implementation of the UserRepository trait.
//!
//! Users live in a single collection keyed by a UUID string `_id`, with
//! unique indexes on `email` and `username`. The outstanding challenge is a
//! nested sub-document that is set with `$set` and cleared with `$unset`.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{doc, to_bson};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;

use dk_core::domain::entities::{Challenge, User};
use dk_core::errors::{AccountError, DomainError};
use dk_core::repositories::UserRepository;

use super::documents::{to_bson_datetime, ChallengeDocument, UserDocument, USERS_COLLECTION};
use crate::database::DatabaseConnection;
use crate::InfrastructureError;

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB implementation of UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(connection: &DatabaseConnection) -> Self {
        Self {
            collection: connection.database().collection(USERS_COLLECTION),
        }
    }

    /// Map a failed insert to the account error for the violated index
    fn map_insert_error(error: mongodb::error::Error, user: &User) -> DomainError {
        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = error.kind.as_ref() {
            if write_error.code == DUPLICATE_KEY_CODE {
                return if write_error.message.contains("username") {
                    AccountError::UsernameTaken {
                        username: user.username.clone(),
                    }
                    .into()
                } else {
                    AccountError::EmailTaken.into()
                };
            }
        }
        Self::database_error("insert_one", error)
    }

    fn database_error(operation: &'static str, error: mongodb::error::Error) -> DomainError {
        tracing::error!(
            operation = operation,
            collection = USERS_COLLECTION,
            error = %error,
            event = "database_error",
            "MongoDB operation failed"
        );
        InfrastructureError::Database(error).into()
    }

    async fn exists(&self, filter: mongodb::bson::Document) -> Result<bool, DomainError> {
        let count = self
            .collection
            .count_documents(filter, None)
            .await
            .map_err(|e| Self::database_error("count_documents", e))?;
        Ok(count > 0)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let document = self
            .collection
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(|e| Self::database_error("find_one", e))?;

        document
            .map(User::try_from)
            .transpose()
            .map_err(DomainError::from)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists(doc! { "email": email }).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.exists(doc! { "username": username }).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.collection
            .insert_one(UserDocument::from(&user), None)
            .await
            .map_err(|e| Self::map_insert_error(e, &user))?;
        Ok(user)
    }

    async fn store_challenge(
        &self,
        email: &str,
        challenge: &Challenge,
    ) -> Result<bool, DomainError> {
        let challenge = to_bson(&ChallengeDocument::from(challenge))
            .map_err(|e| InfrastructureError::Mapping(e.to_string()))?;

        let result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! {
                    "$set": {
                        "challenge": challenge,
                        "updated_at": to_bson_datetime(Utc::now()),
                    }
                },
                None,
            )
            .await
            .map_err(|e| Self::database_error("update_one", e))?;

        Ok(result.matched_count > 0)
    }

    async fn consume_challenge(&self, email: &str, code: &str) -> Result<bool, DomainError> {
        // The code in the filter makes the clear conditional on nobody having
        // consumed or replaced the challenge since it was read.
        let result = self
            .collection
            .update_one(
                doc! { "email": email, "challenge.code": code },
                doc! {
                    "$set": {
                        "verified": true,
                        "updated_at": to_bson_datetime(Utc::now()),
                    },
                    "$unset": { "challenge": "" },
                },
                None,
            )
            .await
            .map_err(|e| Self::database_error("update_one", e))?;

        Ok(result.matched_count > 0)
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! {
                    "$set": {
                        "password_hash": password_hash,
                        "updated_at": to_bson_datetime(Utc::now()),
                    }
                },
                None,
            )
            .await
            .map_err(|e| Self::database_error("update_one", e))?;

        Ok(result.matched_count > 0)
    }
}

//! Stored document shapes and their mapping to domain entities

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dk_core::domain::entities::{Challenge, User};

use crate::InfrastructureError;

pub const USERS_COLLECTION: &str = "users";

/// Outstanding challenge as stored, nested so code and expiry move together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDocument {
    pub code: String,
    pub expires_at: BsonDateTime,
}

/// A document in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<ChallengeDocument>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

pub(crate) fn to_bson_datetime(value: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(value.timestamp_millis())
}

pub(crate) fn from_bson_datetime(value: BsonDateTime) -> Result<DateTime<Utc>, InfrastructureError> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .ok_or_else(|| InfrastructureError::Mapping(format!("Timestamp out of range: {}", value)))
}

impl From<&Challenge> for ChallengeDocument {
    fn from(challenge: &Challenge) -> Self {
        Self {
            code: challenge.code.clone(),
            expires_at: to_bson_datetime(challenge.expires_at),
        }
    }
}

impl TryFrom<ChallengeDocument> for Challenge {
    type Error = InfrastructureError;

    fn try_from(document: ChallengeDocument) -> Result<Self, Self::Error> {
        Ok(Challenge {
            code: document.code,
            expires_at: from_bson_datetime(document.expires_at)?,
        })
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            verified: user.verified,
            challenge: user.challenge.as_ref().map(ChallengeDocument::from),
            created_at: to_bson_datetime(user.created_at),
            updated_at: to_bson_datetime(user.updated_at),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = InfrastructureError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id)
            .map_err(|e| InfrastructureError::Mapping(format!("Invalid user id: {}", e)))?;

        Ok(User {
            id,
            email: document.email,
            username: document.username,
            password_hash: document.password_hash,
            verified: document.verified,
            challenge: document.challenge.map(Challenge::try_from).transpose()?,
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
        })
    }
}

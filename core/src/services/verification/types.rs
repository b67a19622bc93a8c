//! Types for verification service results

use crate::domain::entities::{Challenge, ChallengeFlow};

use super::traits::DeliveryOutcome;

/// Result of issuing a challenge
///
/// Issuance succeeds whatever `delivery` says; the outcome is kept for
/// logging and tests only.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    /// Normalised address the challenge was issued against
    pub email: String,
    pub flow: ChallengeFlow,
    /// The challenge as persisted
    pub challenge: Challenge,
    pub delivery: DeliveryOutcome,
}

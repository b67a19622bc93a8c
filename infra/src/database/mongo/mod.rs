//! MongoDB repository implementations

mod documents;
mod user_repository_impl;

pub use documents::{ChallengeDocument, UserDocument, USERS_COLLECTION};
pub use user_repository_impl::MongoUserRepository;

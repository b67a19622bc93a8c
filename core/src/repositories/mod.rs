pub mod user;

pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;

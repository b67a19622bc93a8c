//! Account registration and password reset built on the challenge lifecycle

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, RegisteredAccount};

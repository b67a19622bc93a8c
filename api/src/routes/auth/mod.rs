//! Authentication route handlers
//!
//! Account registration, code issuance for both flows, email verification
//! and password reset.

pub mod register;
pub mod reset_password;
pub mod send_code;
pub mod verify_code;

pub use register::register;
pub use reset_password::reset_password;
pub use send_code::send_code;
pub use verify_code::verify_code;

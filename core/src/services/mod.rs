//! Business services containing domain logic and use cases.

pub mod account;
pub mod suggestion;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, RegisteredAccount};
pub use suggestion::{StaticTextGenerator, TextGenerator, UsernameSuggestionService};
pub use verification::{
    Clock, CodeGenerator, DeliveryOutcome, IssuedChallenge, MailGateway, OutboundMail,
    SecureCodeGenerator, SystemClock, VerificationService, VerificationServiceConfig,
};

//! Mail templates for the two challenge flows

use tera::{Context, Tera};

use crate::domain::entities::ChallengeFlow;
use crate::errors::{DomainError, DomainResult};

const VERIFY_EMAIL_TEMPLATE: &str = "verify_email.html";
const RESET_PASSWORD_TEMPLATE: &str = "reset_password.html";

/// Embedded HTML templates rendered with tera
pub struct MailTemplates {
    tera: Tera,
}

impl MailTemplates {
    pub fn new() -> DomainResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                VERIFY_EMAIL_TEMPLATE,
                include_str!("../../../templates/verify_email.html"),
            ),
            (
                RESET_PASSWORD_TEMPLATE,
                include_str!("../../../templates/reset_password.html"),
            ),
        ])
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to load mail templates: {}", e),
        })?;

        Ok(Self { tera })
    }

    /// Subject line for a flow
    pub fn subject(flow: ChallengeFlow) -> &'static str {
        match flow {
            ChallengeFlow::VerifyEmail => "Verify your email address",
            ChallengeFlow::ResetPassword => "Reset your password",
        }
    }

    /// Render the HTML body embedding `code`
    pub fn render(
        &self,
        flow: ChallengeFlow,
        code: &str,
        platform_name: &str,
        expires_in_minutes: i64,
    ) -> DomainResult<String> {
        let template = match flow {
            ChallengeFlow::VerifyEmail => VERIFY_EMAIL_TEMPLATE,
            ChallengeFlow::ResetPassword => RESET_PASSWORD_TEMPLATE,
        };

        let mut context = Context::new();
        context.insert("code", code);
        context.insert("platform_name", platform_name);
        context.insert("expires_in_minutes", &expires_in_minutes);

        self.tera
            .render(template, &context)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to render template {}: {}", template, e),
            })
    }
}

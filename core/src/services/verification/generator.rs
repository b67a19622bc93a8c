//! One-time code generation

use rand::{rngs::OsRng, RngCore};

use crate::errors::{DomainError, DomainResult};

/// Number of distinct codes (000000..=999999)
const CODE_SPACE: u32 = 1_000_000;

/// Largest multiple of `CODE_SPACE` representable in a u32; samples at or
/// above it are redrawn so every code is equally likely.
const SAMPLE_LIMIT: u32 = u32::MAX - (u32::MAX % CODE_SPACE);

/// Source of fresh one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce six zero-padded ASCII digits
    fn generate(&self) -> DomainResult<String>;
}

/// Generator backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl SecureCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> DomainResult<String> {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        loop {
            rng.try_fill_bytes(&mut bytes).map_err(|e| {
                tracing::error!(
                    error = %e,
                    event = "entropy_unavailable",
                    "Operating system random source failed"
                );
                DomainError::Internal {
                    message: format!("Random source unavailable: {}", e),
                }
            })?;

            let sample = u32::from_le_bytes(bytes);
            if sample < SAMPLE_LIMIT {
                return Ok(format!("{:06}", sample % CODE_SPACE));
            }
        }
    }
}

/// Deterministic generator that hands out a fixed list of codes in order,
/// repeating the last one when exhausted
#[cfg(any(test, feature = "test-utils"))]
pub struct SequenceCodeGenerator {
    codes: Vec<String>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl SequenceCodeGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> DomainResult<String> {
        let index = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .min(self.codes.len().saturating_sub(1));
        self.codes.get(index).cloned().ok_or_else(|| DomainError::Internal {
            message: "Code sequence is empty".to_string(),
        })
    }
}

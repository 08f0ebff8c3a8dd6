// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use thiserror::Error;
use crate::models::{GeneratorConfig, Password};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length must be at least 1")]
    ZeroLength,
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Draws passwords from the operating system CSPRNG.
pub struct PasswordGenerator {
    config: GeneratorConfig,
}

impl PasswordGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        PasswordGenerator { config }
    }

    /// Generate `length` characters, each picked independently and
    /// uniformly from the configured alphabet.
    pub fn generate(&self, length: usize) -> Result<Password> {
        if length == 0 {
            return Err(GeneratorError::ZeroLength);
        }

        let symbols = self.config.alphabet.symbols();
        let dist = Uniform::from(0..symbols.len());
        let mut rng = OsRng;

        let password: String = (0..length)
            .map(|_| symbols[dist.sample(&mut rng)])
            .collect();

        Ok(Password::new(password))
    }

    #[cfg(test)]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

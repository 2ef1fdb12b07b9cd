use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email_address, validate_positive_number, validate_required_string, Validate,
};
use std::fmt;

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Everything needed to hand one message to the mail server.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    /// Skip certificate verification on the STARTTLS session. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from_address", &self.from_address)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Validate for SmtpConfig {
    fn validate(&self) -> Result<()> {
        validate_required_string("SMTP_HOST", &self.host)?;
        validate_positive_number("SMTP_PORT", u64::from(self.port), 1)?;
        validate_required_string("SMTP_USER", &self.username)?;
        validate_required_string("SMTP_PASSWORD", &self.password)?;
        validate_email_address("SMTP_FROM", &self.from_address)?;
        Ok(())
    }
}

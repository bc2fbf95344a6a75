//! Shared-password gate for admin operations.
//!
//! The password is compared in plaintext. This keeps casual visitors out of
//! the edit commands and nothing more.

use crate::error::{CalendarError, CalendarResult};

#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    password: Option<String>,
}

impl AdminGate {
    pub fn new(password: Option<String>) -> Self {
        AdminGate {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }

    pub fn verify(&self, attempt: &str) -> CalendarResult<()> {
        let expected = self.password.as_deref().ok_or(CalendarError::AdminNotConfigured)?;

        if attempt == expected {
            Ok(())
        } else {
            Err(CalendarError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_configured_password() {
        let gate = AdminGate::new(Some("clave-2026*".to_string()));
        assert!(gate.verify("clave-2026*").is_ok());
        assert!(matches!(gate.verify("clave-2026"), Err(CalendarError::InvalidCredentials)));
    }

    #[test]
    fn unconfigured_gate_refuses_everyone() {
        let gate = AdminGate::new(Some(String::new()));
        assert!(!gate.is_configured());
        assert!(matches!(gate.verify(""), Err(CalendarError::AdminNotConfigured)));
    }
}

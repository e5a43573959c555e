use std::fmt;

use screencode_common::{Result, ScreencodeError};

/// Bearer token for the remote API, supplied per request
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, trimming surrounding whitespace. Empty tokens are rejected.
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(ScreencodeError::invalid_input("API key is required"));
        }
        Ok(Self(token.to_string()))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_rejects_empty() {
        assert_eq!(Credential::new("  sk-abc \n").unwrap().expose(), "sk-abc");
        assert!(Credential::new("").is_err());
        assert!(Credential::new("   ").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("sk-secret").unwrap();
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Portal login identity.
///
/// Held in process memory for the duration of one user session only. The
/// password never appears in `Debug` output; the only place it is written out
/// is inside the audit request blob.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields present. The portal rejects whitespace-only usernames, so
    /// those count as missing too.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(Credentials::new("coach", "secret").is_complete());
        assert!(!Credentials::new("", "secret").is_complete());
        assert!(!Credentials::new("   ", "secret").is_complete());
        assert!(!Credentials::new("coach", "").is_complete());
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("coach", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("coach"));
        assert!(!rendered.contains("hunter2"));
    }
}

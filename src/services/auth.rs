use crate::errors::ApiError;
use crate::Result;
use std::sync::Arc;

/// Validates the shared API key sent with each upload
#[derive(Clone)]
pub struct AuthService {
    api_key: Arc<str>,
}

impl AuthService {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
        }
    }

    pub fn validate_api_key(&self, api_key: &str) -> bool {
        !api_key.is_empty() && api_key == &*self.api_key
    }

    /// Rejects a missing or unknown key with [`ApiError::Unauthorized`]
    pub fn authorize(&self, api_key: Option<&str>) -> Result<()> {
        match api_key {
            Some(key) if self.validate_api_key(key) => Ok(()),
            _ => {
                tracing::warn!(target: "audit", "Rejected request with invalid API key");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key_success() {
        let auth = AuthService::new("TEST_KEY");
        assert!(auth.validate_api_key("TEST_KEY"));
        assert!(auth.authorize(Some("TEST_KEY")).is_ok());
    }

    #[test]
    fn test_validate_api_key_failure() {
        let auth = AuthService::new("TEST_KEY");
        assert!(!auth.validate_api_key("INVALID_KEY"));
        assert!(!auth.validate_api_key(""));
        assert!(!auth.validate_api_key("test_key"));
        assert!(matches!(
            auth.authorize(Some("INVALID_KEY")),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(auth.authorize(None), Err(ApiError::Unauthorized)));
    }
}

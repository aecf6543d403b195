use base64::Engine;
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// AccessToken is used for API access.
///
/// The token is 256 bit random value which is base64url encoded
/// without padding. The previous format is used because
/// the token is transferred as HTTP header value.
/// The token lenght in characters is 43.
#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, Eq, Hash, PartialEq)]
pub struct AccessToken {
    /// API token which server generates.
    access_token: String,
}

impl AccessToken {
    pub fn generate_new() -> Self {
        let mut token = [0u8; 32];
        OsRng.fill_bytes(&mut token);
        Self {
            access_token: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(token),
        }
    }

    pub fn new(access_token: String) -> Self {
        Self { access_token }
    }

    pub fn into_string(self) -> String {
        self.access_token
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_header_safe() {
        let token = AccessToken::generate_new();
        assert_eq!(token.as_str().len(), 43);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(AccessToken::generate_new(), AccessToken::generate_new());
    }
}

//! JWT token management
//!
//! Provides JWT token generation and validation for the configured shared secret

use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use std::sync::Arc;

use crate::auth::types::{AuthConfig, JwtClaims, SubjectClaims};
use crate::error::{InventoryError, Result};

/// JWT token manager
pub struct JwtManager {
    /// Encoding key
    encoding_key: EncodingKey,
    /// Decoding key
    decoding_key: DecodingKey,
    /// Header used for generated tokens
    header: Header,
    /// Validation configuration
    validation: Validation,
    /// Authentication configuration
    config: Arc<AuthConfig>,
}

impl JwtManager {
    /// Create new JWT manager
    pub fn new(config: Arc<AuthConfig>) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(InventoryError::config("JWT secret must not be empty"));
        }
        let algorithm = config.algorithm()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(algorithm);
        // exp 缺省时放行，存在时仍校验
        validation.set_required_spec_claims(&["sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 30; // 30 seconds tolerance

        Ok(Self {
            encoding_key,
            decoding_key,
            header: Header::new(algorithm),
            validation,
            config,
        })
    }

    /// Generate a token for the given subject
    ///
    /// Falls back to the configured lifetime when `expires_in` is `None`.
    pub fn generate_token(&self, subject: &SubjectClaims, expires_in: Option<i64>) -> Result<String> {
        let claims = JwtClaims::new(
            subject,
            expires_in.unwrap_or(self.config.jwt_expires_in),
        )?;

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            InventoryError::internal_with_source(format!("Token generation failed: {e}"), e)
        })
    }

    /// Validate signature and expiry, then return the raw claims
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        let token_data: TokenData<JwtClaims> = decode(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    InventoryError::authentication_with_source("Token expired", e)
                }
                _ => InventoryError::authentication_with_source(
                    format!("Token validation failed: {e}"),
                    e,
                ),
            })?;

        Ok(token_data.claims)
    }

    /// Validate the token and parse its typed subject
    pub fn validate_subject(&self, token: &str) -> Result<SubjectClaims> {
        let claims = self.validate_token(token)?;
        claims.subject().map_err(|e| {
            InventoryError::authentication_with_source(format!("Malformed token subject: {e}"), e)
        })
    }

    /// Get configuration reference
    #[must_use]
    pub fn get_config(&self) -> &AuthConfig {
        &self.config
    }
}

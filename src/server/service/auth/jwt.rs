//! HS256 JSON Web Tokens.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(signature)` where the signature
//! is HMAC-SHA256 over the first two segments. Only `HS256` is accepted on verification.

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::server::{error::auth::AuthError, model::user::User};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub login: String,
    pub is_moderator: bool,
    pub name: String,
    /// `guest`, `buyer` or `moderator`.
    pub role: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issue time as a unix timestamp.
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    /// Seconds until the token expires, zero once it has.
    pub fn remaining_lifetime(&self) -> Duration {
        let remaining = self.exp - Utc::now().timestamp();
        Duration::from_secs(remaining.max(0) as u64)
    }
}

/// Issues and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct JwtCodec {
    secret: Vec<u8>,
    issuer: String,
    expires_in: Duration,
}

impl JwtCodec {
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            expires_in,
        }
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Issues a token for the user, valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user.id,
            login: user.login.clone(),
            is_moderator: user.is_moderator,
            name: user.name.clone(),
            role: user.role().to_string(),
            exp: now + self.expires_in.as_secs() as i64,
            iat: now,
            iss: self.issuer.clone(),
        };

        self.encode(&claims)
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };

        let header = serde_json::to_vec(&header)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to encode header: {}", e)))?;
        let claims = serde_json::to_vec(claims)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to encode claims: {}", e)))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes())?);

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verifies the algorithm, signature, issuer and expiry of a token.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is authentic and unexpired
    /// - `Err(AuthError::InvalidToken)` - Malformed, wrong algorithm, bad signature or issuer
    /// - `Err(AuthError::TokenExpired)` - Token lifetime has passed
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let malformed = || AuthError::InvalidToken("expected three segments".to_string());
        let (signing_input, signature) = token.rsplit_once('.').ok_or_else(malformed)?;
        let (header, claims) = signing_input.split_once('.').ok_or_else(malformed)?;
        if claims.contains('.') {
            return Err(malformed());
        }

        let header: Header = decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(AuthError::InvalidToken(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| AuthError::InvalidToken(format!("malformed signature: {}", e)))?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken("signature mismatch".to_string()))?;

        let claims: Claims = decode_segment(claims)?;
        if claims.iss != self.issuer {
            return Err(AuthError::InvalidToken(format!("unexpected issuer {}", claims.iss)));
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    fn sign(&self, input: &[u8]) -> Result<Vec<u8>, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::InvalidToken(format!("malformed segment: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("malformed segment: {}", e)))
}

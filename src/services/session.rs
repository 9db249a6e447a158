//! Session service: identity, permissions, login and logout.
//!
//! A [`Session`] is an explicit value built per request from the bearer
//! token (or from a successful login). Nothing is kept in shared storage;
//! tokens are stateless JWTs and logout is a client-side discard.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::errors::{ApiError, AppError};

/// Where clients go when they are not signed in.
pub const LOGIN_PATH: &str = "/login";

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// What the session may do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Permissions {
    pub role: Option<String>,
}

/// Outcome of [`Session::check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCheck {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub logout: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Outcome of [`Session::logout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutOutcome {
    pub success: bool,
    pub redirect_to: String,
}

/// What a client should do after a failed API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorOutcome {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub logout: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub identity: Identity,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned on successful login.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Per-request session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Build a session from an `Authorization` header value.
    ///
    /// A missing, malformed, expired or wrongly-signed token gives an
    /// anonymous session rather than an error.
    pub fn from_authorization(header: Option<&str>, jwt_secret: &str) -> Self {
        header
            .and_then(|h| h.strip_prefix("Bearer "))
            .and_then(|token| validate_token(token, jwt_secret).ok())
            .map(|claims| Self::authenticated(claims.identity))
            .unwrap_or_default()
    }

    pub fn check(&self) -> AuthCheck {
        if self.identity.is_some() {
            return AuthCheck {
                authenticated: true,
                logout: false,
                redirect_to: None,
                error: None,
            };
        }

        AuthCheck {
            authenticated: false,
            logout: true,
            redirect_to: Some(LOGIN_PATH.to_string()),
            error: Some(ApiError {
                code: "UNAUTHORIZED".to_string(),
                message: "Check failed".to_string(),
            }),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn permissions(&self) -> Option<Permissions> {
        self.identity.as_ref().map(|i| Permissions {
            role: i.role.clone(),
        })
    }

    /// Forget the identity. Issued tokens stay valid until they expire.
    pub fn logout(&mut self) -> LogoutOutcome {
        self.identity = None;
        LogoutOutcome {
            success: true,
            redirect_to: LOGIN_PATH.to_string(),
        }
    }
}

/// Map a failed call to a client action: 401 ends the session, anything
/// else hands the error back untouched.
pub fn on_error(status: StatusCode, error: ApiError) -> ErrorOutcome {
    if status == StatusCode::UNAUTHORIZED {
        return ErrorOutcome {
            logout: true,
            error: None,
        };
    }

    ErrorOutcome {
        logout: false,
        error: Some(error),
    }
}

/// User row with credentials, only read during login.
#[derive(Debug, FromRow)]
struct CredentialRow {
    id: i64,
    name: String,
    email: String,
    role: Option<String>,
    image: Option<String>,
    password_hash: String,
}

impl From<CredentialRow> for Identity {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            image: row.image,
        }
    }
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Sign an access token carrying `identity`.
pub fn generate_token(
    identity: &Identity,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: identity.email.clone(),
        identity: identity.clone(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());
    let access_token = jsonwebtoken::encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    Ok(TokenPair {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: expiry_secs,
    })
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Authenticate by email and password, returning the new session and its token.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<(Session, TokenPair), AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, name, email, role, image, password_hash FROM users WHERE email = $1",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    let identity = authenticate(row, password)?;
    let tokens = generate_token(&identity, jwt_secret, expiry_secs)?;
    tracing::info!(user_id = identity.id, "Login succeeded");

    Ok((Session::authenticated(identity), tokens))
}

/// Check `password` against the looked-up row.
///
/// Unknown email and wrong password each cost exactly one argon2 verification.
fn authenticate(row: Option<CredentialRow>, password: &str) -> Result<Identity, AppError> {
    let Some(row) = row else {
        verify_password(password, unknown_account_hash()?)?;
        tracing::info!("Login rejected: unknown email");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(password, &row.password_hash)? {
        tracing::info!(email = %row.email, "Login rejected: wrong password");
        return Err(AppError::Unauthorized);
    }

    Ok(Identity::from(row))
}

/// Hash of a random throwaway password, generated once per process.
fn unknown_account_hash() -> Result<&'static str, AppError> {
    static HASH: OnceLock<String> = OnceLock::new();

    if let Some(hash) = HASH.get() {
        return Ok(hash.as_str());
    }
    let throwaway = SaltString::generate(&mut OsRng);
    let hash = hash_password(throwaway.as_str())?;
    Ok(HASH.get_or_init(|| hash).as_str())
}

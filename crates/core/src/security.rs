use crate::app_state::AppState;
use agritrack_primitives::error::{ApiError, AuthError};
use agritrack_primitives::models::entities::user::User;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            warn!("Invalid user ID in claims: {}", e);
            AuthError::InvalidToken("Invalid user ID".to_string())
        })
    }
}

/// The authenticated account, placed in request extensions by `auth_middleware`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

pub struct SecurityConfig;

impl SecurityConfig {
    pub fn create_token(state: &AppState, user_id: Uuid) -> Result<String, ApiError> {
        let jwt = &state.config.jwt_details;
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(jwt.jwt_expiration_days)).timestamp(),
            iss: jwt.jwt_issuer.clone(),
            aud: jwt.jwt_audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            error!("JWT encoding error: {}", e);
            ApiError::Token("Token creation failed".into())
        })
    }

    pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
        let auth_header = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidFormat)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::InvalidFormat);
        }

        Ok(token.to_string())
    }

    pub fn verify_token(state: &AppState, token: &str) -> Result<Claims, AuthError> {
        let jwt = &state.config.jwt_details;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[jwt.jwt_issuer.as_str()]);
        validation.set_audience(&[jwt.jwt_audience.as_str()]);
        validation.validate_exp = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken("Invalid or expired token".into()))
    }

    /// Resolves a bearer token to a live account.
    pub fn authenticate(state: &AppState, token: &str) -> Result<(User, Claims), ApiError> {
        let claims = Self::verify_token(state, token)?;
        let user_id = claims.user_id()?;

        let user = state
            .users
            .find_by_id(user_id)?
            .ok_or(AuthError::UserNotFound)?;

        Ok((user, claims))
    }

    pub async fn auth_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let token = Self::extract_bearer_token(req.headers())?;
        let (user, claims) = Self::authenticate(&state, &token)?;

        debug!(user_id = %user.id, jti = %claims.jti, "request authenticated");
        req.extensions_mut().insert(CurrentUser(user));
        Ok(next.run(req).await)
    }
}

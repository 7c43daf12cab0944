use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use service::auth::domain::{LoginInput, SignupInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{decode_token, AuthConfig, AuthService};
use service::photo::PhotoIngestor;

use crate::errors::ApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub ingestor: Arc<PhotoIngestor>,
}

/// The authenticated requester, decoded from the session cookie. Any
/// handler taking this as an argument is a protected route.
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(AUTH_COOKIE).ok_or(ApiError::Unauthenticated)?;
        let claims = decode_token(&state.auth.jwt_secret, cookie.value())
            .map_err(|_| ApiError::Unauthenticated)?;
        let id = Uuid::parse_str(&claims.uid).map_err(|_| ApiError::Unauthenticated)?;
        Ok(CurrentUser { id, username: claims.sub })
    }
}

fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    let repo = Arc::new(SeaOrmAuthRepository { db: state.db.clone() });
    AuthService::new(repo, AuthConfig { jwt_secret: Some(state.auth.jwt_secret.clone()) })
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Create the account and establish the session in one step, then send
/// the new user to their (empty) cat index.
pub async fn signup(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<SignupInput>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let session = auth_service(&state).signup(input).await?;
    let token = session.token.ok_or_else(|| ApiError::Internal("token generation failed".into()))?;
    let jar = jar.add(session_cookie(token));
    Ok((jar, Redirect::to("/cats")))
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let session = auth_service(&state).login(input).await?;
    let token = session.token.ok_or_else(|| ApiError::Internal("token generation failed".into()))?;
    let jar = jar.add(session_cookie(token));
    Ok((jar, Redirect::to("/cats")))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::from(AUTH_COOKIE));
    (jar, Redirect::to("/"))
}

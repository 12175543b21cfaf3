use crate::{
    auth::{
        hash_password, verify_password, AccessToken, AuthState, Credentials, RefreshIdentity,
        TokenKind,
    },
    error::AppError,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Sign up
///
/// Creates a new user account and returns an access/refresh token pair.
#[post("/signup")]
pub async fn signup(
    users: web::Data<dyn UserStore>,
    auth: web::Data<AuthState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let (username, password) = credentials.required()?;
    credentials.validate()?;

    if users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password = password.to_string();
    let cost = auth.bcrypt_cost;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    let user = users.create(username, &password_hash).await?;
    log::info!("registered user {} (id {})", user.username, user.id);

    Ok(HttpResponse::Created().json(auth.issue_pair(&user.username)?))
}

/// Login
///
/// Checks the credentials and returns a fresh access/refresh token pair.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserStore>,
    auth: web::Data<AuthState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let (username, password) = credentials.required()?;
    let bad_credentials = || AppError::Unauthorized("Bad username or password".into());

    let user = match users.find_by_username(username).await? {
        Some(user) => user,
        None => {
            log::warn!("login attempt for unknown user {}", username);
            return Err(bad_credentials());
        }
    };

    let password = password.to_string();
    let password_hash = user.password_hash.clone();
    if !web::block(move || verify_password(&password, &password_hash)).await?? {
        log::warn!("wrong password for user {}", user.username);
        return Err(bad_credentials());
    }

    Ok(HttpResponse::Ok().json(auth.issue_pair(&user.username)?))
}

/// Refresh
///
/// Trades a refresh token (in the `Authorization` header) for a new access token.
#[post("/refresh")]
pub async fn refresh(
    identity: RefreshIdentity,
    auth: web::Data<AuthState>,
) -> Result<impl Responder, AppError> {
    let access_token = auth.tokens.issue(&identity.0, TokenKind::Access)?;
    Ok(HttpResponse::Ok().json(AccessToken { access_token }))
}

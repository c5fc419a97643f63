use actix_web::{web, Responder};
use log::{debug, info, warn};
use crate::model::LoginRequest;
use crate::server::controller::error::CustomError;
use crate::server::state::AppState;

/// Check credentials against the stored hash and return the account.
pub(crate) async fn login(body: web::Json<LoginRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let LoginRequest { username, password } = body.into_inner();
    info!("login attempt for user={}", username);
    let Some(user) = data.users().find_by_username(&username).await? else {
        warn!("user={} not found", username);
        return Err(CustomError::Unauthorized);
    };
    debug!("user={} found with id={}", username, user.id);
    if !data.passwords().matches(&password, &user.password_hash) {
        warn!("password mismatch for user={}", username);
        return Err(CustomError::Unauthorized);
    }
    info!("login ok for user={}", username);
    Ok(web::Json(user.view()))
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(login))
        .route("/api/auth/login", web::post().to(login));
}

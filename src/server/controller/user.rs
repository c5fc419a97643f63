use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::info;
use crate::model::NewUser;
use crate::server::controller::error::CustomError;
use crate::server::state::AppState;

#[get("/api/users")]
async fn get_users(data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let users = data.users().find_all().await?;
    Ok(web::Json(users.iter().map(|record| record.view()).collect::<Vec<_>>()))
}

#[get("/api/users/{id}")]
async fn get_user(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    data.users()
        .find_by_id(id.into_inner())
        .await?
        .map(|record| web::Json(record.view()))
        .ok_or(CustomError::ResourceNotFound)
}

#[post("/api/users")]
/// create an account, the password is stored hashed
async fn post_user(body: web::Json<NewUser>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let NewUser { username, password, role } = body.into_inner();
    let username = username.trim();
    if username.is_empty() {
        return Err(CustomError::bad_request("username cannot be empty"));
    }
    if password.is_empty() {
        return Err(CustomError::bad_request("password cannot be empty"));
    }
    let hash = data.passwords().encode(&password)?;
    let record = data.users().insert(username, &hash, role).await?;
    info!("created user={} role={}", record.username, record.role);
    Ok(HttpResponse::Created().json(record.view()))
}

#[delete("/api/users/{id}")]
async fn delete_user(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    match data.users().delete_by_id(id.into_inner()).await? {
        true => Ok(HttpResponse::NoContent().finish()),
        false => Err(CustomError::ResourceNotFound),
    }
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_users)
        .service(get_user)
        .service(post_user)
        .service(delete_user);
}

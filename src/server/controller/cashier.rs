use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::info;
use crate::model::Cashier;
use crate::server::controller::error::CustomError;
use crate::server::state::AppState;

fn validate(cashier: &Cashier) -> Result<(), CustomError> {
    if cashier.name.trim().is_empty() {
        return Err(CustomError::bad_request("cashier name cannot be empty"));
    }
    if cashier.salary.is_some_and(|salary| salary < 0) {
        return Err(CustomError::bad_request("cashier salary cannot be negative"));
    }
    Ok(())
}

#[get("/api/cashiers")]
/// list cashiers
async fn get_cashiers(data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    Ok(web::Json(data.cashiers().find_all().await?))
}

#[get("/api/cashiers/{id}")]
async fn get_cashier(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    data.cashiers()
        .find_by_id(id.into_inner())
        .await?
        .map(web::Json)
        .ok_or(CustomError::ResourceNotFound)
}

#[get("/api/cashiers/name/{name}")]
/// look a cashier up by exact name
async fn get_cashier_by_name(name: web::Path<String>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    data.cashiers()
        .find_by_name(&name)
        .await?
        .map(web::Json)
        .ok_or(CustomError::ResourceNotFound)
}

#[post("/api/cashiers")]
async fn post_cashier(body: web::Json<Cashier>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let cashier = body.into_inner();
    validate(&cashier)?;
    let saved = data.cashiers().insert(cashier).await?;
    info!("created cashier id={:?}", saved.id);
    Ok(HttpResponse::Created().json(saved))
}

#[put("/api/cashiers/{id}")]
/// replace name and salary of a cashier
async fn put_cashier(
    id: web::Path<i64>,
    body: web::Json<Cashier>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let cashier = body.into_inner();
    validate(&cashier)?;
    data.cashiers()
        .update(id.into_inner(), cashier)
        .await?
        .map(web::Json)
        .ok_or(CustomError::ResourceNotFound)
}

#[delete("/api/cashiers/{id}")]
async fn delete_cashier(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    match data.cashiers().delete_by_id(id.into_inner()).await? {
        true => Ok(HttpResponse::NoContent().finish()),
        false => Err(CustomError::ResourceNotFound),
    }
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_cashiers)
        .service(get_cashier_by_name)
        .service(get_cashier)
        .service(post_cashier)
        .service(put_cashier)
        .service(delete_cashier);
}

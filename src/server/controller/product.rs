//! CRUD routes shared by appetizers, drinks and main courses.

use actix_web::{web, HttpResponse, Responder, Scope};
use log::info;
use crate::model::{Appetizer, Drink, MainCourse, MenuItem};
use crate::server::controller::error::CustomError;
use crate::server::repository::ProductRepository;
use crate::server::state::AppState;

/// A product kind with a repository in [`AppState`].
pub(crate) trait Stocked: MenuItem {
    fn repository(state: &AppState) -> &dyn ProductRepository<Self>;
}

impl Stocked for Appetizer {
    fn repository(state: &AppState) -> &dyn ProductRepository<Self> {
        state.appetizers()
    }
}

impl Stocked for Drink {
    fn repository(state: &AppState) -> &dyn ProductRepository<Self> {
        state.drinks()
    }
}

impl Stocked for MainCourse {
    fn repository(state: &AppState) -> &dyn ProductRepository<Self> {
        state.main_courses()
    }
}

/// Mount the product routes of `P` under `path`.
pub(crate) fn scope<P: Stocked>(path: &str) -> Scope {
    web::scope(path)
        .route("", web::get().to(list::<P>))
        .route("", web::post().to(create::<P>))
        .route("/{id}", web::get().to(get::<P>))
        .route("/{id}", web::put().to(update::<P>))
        .route("/{id}", web::delete().to(delete::<P>))
}

fn validate<P: MenuItem>(item: &P) -> Result<(), CustomError> {
    if item.name().trim().is_empty() {
        return Err(CustomError::bad_request(format!("{} name cannot be empty", P::KIND)));
    }
    if item.price() < 0 {
        return Err(CustomError::bad_request(format!("{} price cannot be negative", P::KIND)));
    }
    Ok(())
}

async fn list<P: Stocked>(data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    Ok(web::Json(P::repository(&data).find_all().await?))
}

async fn get<P: Stocked>(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    match P::repository(&data).find_by_id(id.into_inner()).await? {
        Some(item) => Ok(web::Json(item)),
        None => Err(CustomError::ResourceNotFound),
    }
}

async fn create<P: Stocked>(body: web::Json<P>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let item = body.into_inner();
    validate(&item)?;
    let saved = P::repository(&data).insert(item).await?;
    info!("created {} id={:?}", P::KIND, saved.id());
    Ok(HttpResponse::Created().json(saved))
}

async fn update<P: Stocked>(
    id: web::Path<i64>,
    body: web::Json<P>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let item = body.into_inner();
    validate(&item)?;
    match P::repository(&data).update(id.into_inner(), item).await? {
        Some(updated) => Ok(web::Json(updated)),
        None => Err(CustomError::ResourceNotFound),
    }
}

async fn delete<P: Stocked>(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let id = id.into_inner();
    if !P::repository(&data).delete_by_id(id).await? {
        return Err(CustomError::ResourceNotFound);
    }
    info!("deleted {} id={}", P::KIND, id);
    Ok(HttpResponse::NoContent().finish())
}

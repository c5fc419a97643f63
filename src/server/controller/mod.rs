pub(crate) mod auth;
pub(crate) mod cashier;
pub(crate) mod error;
pub(crate) mod health;
pub(crate) mod menu;
pub(crate) mod product;
pub(crate) mod user;

use actix_web::web;
use crate::model::{Appetizer, Drink, MainCourse};

/// Register every route of the POS api.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(product::scope::<Appetizer>("/api/appetizers"))
        .service(product::scope::<Drink>("/api/drinks"))
        .service(product::scope::<MainCourse>("/api/maincourses"))
        .service(product::scope::<MainCourse>("/api/main-courses"))
        .service(menu::get_menu)
        .service(health::health)
        .service(health::db_check)
        .configure(cashier::configure)
        .configure(user::configure)
        .configure(auth::configure);
}

use actix_web::{get, web, Responder};
use crate::model::Menu;
use crate::server::controller::error::CustomError;
use crate::server::state::AppState;

#[get("/api/menu")]
/// every product grouped by kind
async fn get_menu(data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let main_courses = data.main_courses().find_all().await?;
    let appetizers = data.appetizers().find_all().await?;
    let drinks = data.drinks().find_all().await?;
    Ok(web::Json(Menu::new(main_courses, appetizers, drinks)))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::Value;
    use crate::model::{Appetizer, Drink, MenuItem, ProductFields};
    use super::*;

    #[actix_web::test]
    async fn menu_counts_all_kinds() {
        let state = AppState::in_memory();
        state.drinks().insert(Drink::from_fields(ProductFields::new(None, "Tea", 2))).await.unwrap();
        state.drinks().insert(Drink::from_fields(ProductFields::new(None, "Coffee", 3))).await.unwrap();
        state.appetizers().insert(Appetizer::from_fields(ProductFields::new(None, "Salad", 5))).await.unwrap();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).service(get_menu)).await;

        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let menu: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(menu["totalItems"], 3);
        assert_eq!(menu["drinks"].as_array().map(Vec::len), Some(2));
        assert_eq!(menu["mainCourses"], Value::Array(vec![]));
        assert_eq!(menu["appetizers"][0]["itemAppetizers"], "Salad");
    }
}

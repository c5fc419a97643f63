use crate::client::api_client::ApiClient;
use crate::client::service::ServiceError;
use crate::model::{Appetizer, Cashier, Drink, MainCourse};

#[derive(Debug, Clone)]
pub struct ReportService {
    api: ApiClient,
}

impl ReportService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn cashier_info(&self) -> Result<Vec<Cashier>, ServiceError> {
        Ok(self.api.get_all_cashiers().await?)
    }

    /// Fetches every product list, so it doubles as a connectivity check.
    pub async fn check_menu_status(&self) -> Result<String, ServiceError> {
        let appetizers = self.api.get_all::<Appetizer>().await?;
        let drinks = self.api.get_all::<Drink>().await?;
        let main_courses = self.api.get_all::<MainCourse>().await?;
        Ok(format!(
            "Menu System Online: {} appetizers, {} drinks, {} main courses available.",
            appetizers.len(),
            drinks.len(),
            main_courses.len()
        ))
    }
}

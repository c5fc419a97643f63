use serde::{Deserialize, Serialize};
use crate::model::product::{Appetizer, Drink, MainCourse};

/// Every product on sale, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub main_courses: Vec<MainCourse>,
    pub appetizers: Vec<Appetizer>,
    pub drinks: Vec<Drink>,
    pub total_items: usize,
}

impl Menu {
    pub fn new(main_courses: Vec<MainCourse>, appetizers: Vec<Appetizer>, drinks: Vec<Drink>) -> Self {
        let total_items = main_courses.len() + appetizers.len() + drinks.len();
        Self {
            main_courses,
            appetizers,
            drinks,
            total_items,
        }
    }
}

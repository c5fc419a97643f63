use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cashier {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub salary: Option<i32>,
}

impl Cashier {
    pub fn new(name: impl Into<String>, salary: Option<i32>) -> Self {
        Self {
            id: None,
            name: name.into(),
            salary,
        }
    }
}

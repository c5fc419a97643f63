use std::fmt::Debug;
use std::str::FromStr;
use derive_more::Display;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The three sellable product families.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    #[display("appetizer")]
    Appetizer,
    #[display("drink")]
    Drink,
    #[display("main course")]
    MainCourse,
}

impl ProductKind {
    /// path segment under `/api`
    pub fn path(&self) -> &'static str {
        match self {
            ProductKind::Appetizer => "appetizers",
            ProductKind::Drink => "drinks",
            ProductKind::MainCourse => "maincourses",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            ProductKind::Appetizer => "appetizers",
            ProductKind::Drink => "drinks",
            ProductKind::MainCourse => "main_courses",
        }
    }
}

impl FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appetizer" | "appetizers" => Ok(Self::Appetizer),
            "drink" | "drinks" => Ok(Self::Drink),
            "main-course" | "main-courses" | "maincourse" | "maincourses" => Ok(Self::MainCourse),
            s => Err(format!("Invalid product kind: {s}")),
        }
    }
}

/// Kind-independent view of a product row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub id: Option<i64>,
    pub name: String,
    pub price: i32,
    pub receipt_id: Option<i64>,
    pub available: bool,
}

impl ProductFields {
    pub fn new(id: Option<i64>, name: impl Into<String>, price: i32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            receipt_id: None,
            available: true,
        }
    }
}

/// A product that can be listed on the menu and stored by a repository.
///
/// Each kind keeps its own JSON field names on the wire, everything else goes through
/// [`ProductFields`].
pub trait MenuItem: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const KIND: ProductKind;

    fn from_fields(fields: ProductFields) -> Self;

    fn fields(&self) -> ProductFields;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    fn name(&self) -> &str;

    fn price(&self) -> i32;
}

fn available_by_default() -> bool {
    true
}

macro_rules! menu_item {
    (
        $(#[$meta:meta])*
        $ty:ident, $kind:expr, id = $id:literal, name = $name:literal, price = $price:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $ty {
            #[serde(rename = $id, default)]
            pub id: Option<i64>,
            #[serde(rename = $name)]
            pub name: String,
            #[serde(rename = $price)]
            pub price: i32,
            #[serde(rename = "receiptId", default)]
            pub receipt_id: Option<i64>,
            #[serde(default = "available_by_default")]
            pub available: bool,
        }

        impl MenuItem for $ty {
            const KIND: ProductKind = $kind;

            fn from_fields(fields: ProductFields) -> Self {
                Self {
                    id: fields.id,
                    name: fields.name,
                    price: fields.price,
                    receipt_id: fields.receipt_id,
                    available: fields.available,
                }
            }

            fn fields(&self) -> ProductFields {
                ProductFields {
                    id: self.id,
                    name: self.name.clone(),
                    price: self.price,
                    receipt_id: self.receipt_id,
                    available: self.available,
                }
            }

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: Option<i64>) {
                self.id = id;
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn price(&self) -> i32 {
                self.price
            }
        }
    };
}

menu_item!(
    /// Starter served before the main course.
    Appetizer, ProductKind::Appetizer,
    id = "appetizersId", name = "itemAppetizers", price = "appetizersPrice"
);

menu_item!(
    Drink, ProductKind::Drink,
    id = "drinksId", name = "itemDrinks", price = "drinksPrice"
);

menu_item!(
    MainCourse, ProductKind::MainCourse,
    id = "foodId", name = "itemFood", price = "foodPrice"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_wire_field_names_per_kind() {
        let drink: Drink = serde_json::from_str(r#"{"drinksId":4,"itemDrinks":"Tea","drinksPrice":3,"receiptId":null}"#).unwrap();
        assert_eq!(drink.id, Some(4));
        assert_eq!(drink.name, "Tea");
        assert!(drink.available, "availability defaults to true");

        let json = serde_json::to_value(MainCourse::from_fields(ProductFields::new(Some(1), "Kabsa", 25))).unwrap();
        assert_eq!(json["foodId"], 1);
        assert_eq!(json["itemFood"], "Kabsa");
        assert_eq!(json["foodPrice"], 25);
        assert_eq!(json["available"], true);
    }

    #[test]
    fn id_is_optional_on_create() {
        let appetizer: Appetizer = serde_json::from_str(r#"{"itemAppetizers":"Hummus","appetizersPrice":7}"#).unwrap();
        assert_eq!(appetizer.id(), None);
        assert_eq!(appetizer.price(), 7);
    }

    #[test]
    fn parse_kind() {
        assert_eq!("main-course".parse::<ProductKind>(), Ok(ProductKind::MainCourse));
        assert_eq!("drinks".parse::<ProductKind>(), Ok(ProductKind::Drink));
        assert!("dessert".parse::<ProductKind>().is_err());
        assert_eq!(ProductKind::MainCourse.to_string(), "main course");
    }
}

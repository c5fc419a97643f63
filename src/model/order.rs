use serde::{Deserialize, Serialize};
use crate::model::product::{MenuItem, ProductKind};

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub kind: ProductKind,
    pub product_id: Option<i64>,
    pub name: String,
    pub unit_price: i32,
    pub quantity: u32,
}

impl OrderLine {
    pub fn of<P: MenuItem>(product: &P, quantity: u32) -> Self {
        Self {
            kind: P::KIND,
            product_id: product.id(),
            name: product.name().to_string(),
            unit_price: product.price(),
            quantity,
        }
    }

    pub fn amount(&self) -> f64 {
        f64::from(self.unit_price) * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<P: MenuItem>(&mut self, product: &P, quantity: u32) -> &mut Self {
        self.lines.push(OrderLine::of(product, quantity));
        self
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(OrderLine::amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Appetizer, Drink, ProductFields};

    #[test]
    fn subtotal_sums_quantities() {
        let mut order = Order::new();
        order
            .add(&Appetizer::from_fields(ProductFields::new(Some(1), "Samosa", 4)), 3)
            .add(&Drink::from_fields(ProductFields::new(Some(2), "Lemonade", 6)), 1);

        assert_eq!(order.lines[0].kind, ProductKind::Appetizer);
        assert_eq!(order.subtotal(), 18.0);
        assert!(Order::new().subtotal() == 0.0 && Order::new().is_empty());
    }
}

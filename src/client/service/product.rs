use std::marker::PhantomData;
use crate::client::api_client::ApiClient;
use crate::client::service::ServiceError;
use crate::model::{MenuItem, ProductFields};

/// Catalogue management for one product kind.
#[derive(Debug, Clone)]
pub struct ProductService<P> {
    api: ApiClient,
    kind: PhantomData<fn() -> P>,
}

impl<P: MenuItem> ProductService<P> {
    pub fn new(api: ApiClient) -> Self {
        Self { api, kind: PhantomData }
    }

    pub async fn get_all(&self) -> Result<Vec<P>, ServiceError> {
        Ok(self.api.get_all::<P>().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<P>, ServiceError> {
        Ok(self.api.get_by_id::<P>(id).await?)
    }

    pub async fn add(&self, name: &str, price: &str) -> Result<P, ServiceError> {
        let item = Self::build(None, name, price)?;
        Ok(self.api.create(&item).await?)
    }

    /// `id` is whatever the operator selected, `None` when nothing is.
    pub async fn update(&self, id: Option<i64>, name: &str, price: &str) -> Result<P, ServiceError> {
        let id = Self::selected(id)?;
        let edited = Self::build(Some(id), name, price)?;
        // availability and receipt are not editable here, keep the stored ones
        let item = match self.api.get_by_id::<P>(id).await? {
            Some(current) => Self::apply_edit(&current, &edited),
            None => edited,
        };
        Ok(self.api.update(id, &item).await?)
    }

    pub async fn delete(&self, id: Option<i64>) -> Result<(), ServiceError> {
        let id = Self::selected(id)?;
        Ok(self.api.delete::<P>(id).await?)
    }

    fn selected(id: Option<i64>) -> Result<i64, ServiceError> {
        id.ok_or_else(|| ServiceError::validation(format!("No {} selected!", P::KIND)))
    }

    fn build(id: Option<i64>, name: &str, price: &str) -> Result<P, ServiceError> {
        let price = validate_and_parse_price(price)?;
        validate_name(name)?;
        Ok(P::from_fields(ProductFields::new(id, name, price)))
    }

    /// `current` with the name and price of `edited`
    fn apply_edit(current: &P, edited: &P) -> P {
        let mut fields = current.fields();
        fields.id = edited.id();
        fields.name = edited.name().to_string();
        fields.price = edited.price();
        P::from_fields(fields)
    }
}

pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation("Item name cannot be empty."));
    }
    Ok(())
}

/// Whole, non-negative price from operator input.
pub fn validate_and_parse_price(text: &str) -> Result<i32, ServiceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::validation("Price cannot be empty."));
    }
    let price: i32 = text
        .parse()
        .map_err(|_| ServiceError::validation("Price must be a valid whole number."))?;
    if price < 0 {
        return Err(ServiceError::validation("Price cannot be negative."));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drink, MainCourse};

    #[test]
    fn price_parsing() {
        assert_eq!(validate_and_parse_price(" 25 ").unwrap(), 25);
        assert_eq!(validate_and_parse_price("0").unwrap(), 0);

        let reason = |text: &str| validate_and_parse_price(text).unwrap_err().to_string();
        assert_eq!(reason("  "), "Price cannot be empty.");
        assert_eq!(reason("12.5"), "Price must be a valid whole number.");
        assert_eq!(reason("ten"), "Price must be a valid whole number.");
        assert_eq!(reason("-3"), "Price cannot be negative.");
    }

    #[test]
    fn price_is_checked_before_name() {
        let err = ProductService::<Drink>::build(None, "", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Price must be a valid whole number.");
        let err = ProductService::<Drink>::build(None, " ", "4").unwrap_err();
        assert_eq!(err.to_string(), "Item name cannot be empty.");

        let drink = ProductService::<Drink>::build(Some(7), "Mint tea", " 4").unwrap();
        assert_eq!((drink.id, drink.name.as_str(), drink.price), (Some(7), "Mint tea", 4));
    }

    #[test]
    fn edit_keeps_availability_and_receipt() {
        let mut sold_out = Drink::from_fields(ProductFields::new(Some(3), "Mango", 6));
        sold_out.available = false;
        sold_out.receipt_id = Some(9);
        let edited = ProductService::<Drink>::build(Some(3), "Mango juice", "7").unwrap();

        let merged = ProductService::<Drink>::apply_edit(&sold_out, &edited);
        assert_eq!(
            merged,
            Drink { id: Some(3), name: "Mango juice".to_string(), price: 7, receipt_id: Some(9), available: false }
        );
    }

    #[tokio::test]
    async fn nothing_selected() {
        let service = ProductService::<MainCourse>::new(ApiClient::new("http://127.0.0.1:9").unwrap());
        let err = service.update(None, "Kabsa", "30").await.unwrap_err();
        assert_eq!(err.to_string(), "No main course selected!");
        let err = service.delete(None).await.unwrap_err();
        assert_eq!(err.to_string(), "No main course selected!");
    }
}

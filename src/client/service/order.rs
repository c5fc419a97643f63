use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use crate::client::service::ServiceError;
use crate::model::{BillResult, Order};

pub const VAT_RATE: f64 = 0.15;
pub const DEFAULT_RECEIPTS_DIR: &str = "receipts";

/// Bill arithmetic and receipt files. Works offline.
#[derive(Debug, Clone)]
pub struct OrderService {
    receipts: PathBuf,
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(DEFAULT_RECEIPTS_DIR)
    }
}

impl OrderService {
    pub fn new(receipts: impl Into<PathBuf>) -> Self {
        Self { receipts: receipts.into() }
    }

    pub fn receipts_dir(&self) -> &Path {
        &self.receipts
    }

    /// Subtotal, VAT and total, each rounded half-up to cents.
    pub fn calculate_bill(&self, subtotal: f64) -> BillResult {
        let vat = subtotal * VAT_RATE;
        BillResult {
            sub_total: round_cents(subtotal),
            vat: round_cents(vat),
            total: round_cents(subtotal + vat),
        }
    }

    pub fn bill_for(&self, order: &Order) -> BillResult {
        self.calculate_bill(order.subtotal())
    }

    /// Write `billNo.<n>.txt` under the receipts directory, creating it when missing.
    pub fn generate_receipt_file(&self, receipt_no: u32, bill: &BillResult) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(&self.receipts)?;
        let path = self.receipts.join(format!("billNo.{}.txt", receipt_no));
        fs::write(&path, receipt_text(receipt_no, bill))?;
        info!("receipt={} written to {}", receipt_no, path.display());
        Ok(path)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn receipt_text(receipt_no: u32, bill: &BillResult) -> String {
    // `{:?}` keeps the decimal point on whole amounts, e.g. 10.0
    let mut out = String::new();
    let _ = writeln!(out, " Bill number is: {}", receipt_no);
    let _ = writeln!(out, "==============");
    let _ = writeln!(out, "--------------");
    let _ = writeln!(out, "Subtotal is: {:?} SR", bill.sub_total);
    let _ = writeln!(out, "vat: {:?} SR", bill.vat);
    let _ = writeln!(out, "Total is: {:?} SR", bill.total);
    let _ = writeln!(out);
    let _ = writeln!(out, "THANK YOU FOR ORDERING");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Appetizer, MainCourse, MenuItem, ProductFields};

    #[test]
    fn bill_rounding() {
        let service = OrderService::default();
        assert_eq!(
            service.calculate_bill(10.0),
            BillResult { sub_total: 10.0, vat: 1.5, total: 11.5 }
        );
        assert_eq!(
            service.calculate_bill(12.34),
            BillResult { sub_total: 12.34, vat: 1.85, total: 14.19 }
        );
        assert_eq!(service.calculate_bill(0.0).total, 0.0);
        assert_eq!(service.receipts_dir(), Path::new("receipts"));
    }

    #[test]
    fn bill_for_order() {
        let mut order = Order::new();
        order
            .add(&MainCourse::from_fields(ProductFields::new(Some(1), "Mandi", 35)), 2)
            .add(&Appetizer::from_fields(ProductFields::new(Some(4), "Hummus", 9)), 1);
        let bill = OrderService::default().bill_for(&order);
        assert_eq!(bill, BillResult { sub_total: 79.0, vat: 11.85, total: 90.85 });
    }

    #[test]
    fn receipt_layout() {
        let dir = tempfile::tempdir().unwrap();
        let service = OrderService::new(dir.path().join("nested/receipts"));
        let bill = service.calculate_bill(10.0);

        let path = service.generate_receipt_file(42, &bill).unwrap();
        assert_eq!(path.file_name().unwrap(), "billNo.42.txt");
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            " Bill number is: 42\n\
             ==============\n\
             --------------\n\
             Subtotal is: 10.0 SR\n\
             vat: 1.5 SR\n\
             Total is: 11.5 SR\n\
             \n\
             THANK YOU FOR ORDERING\n"
        );
    }
}

use serde::Serialize;

pub const REDUCED_TITLE: &str = "A price has been reduced";

/// The watched price counts as reduced once it reaches the target.
pub fn is_price_reduced(target_price: f64, actual_price: f64) -> bool {
    actual_price <= target_price
}

/// Outcome of comparing one scraped price against the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCheck {
    pub title: String,
    pub actual_price: f64,
    pub target_price: f64,
    pub reduced: bool,
}

impl PriceCheck {
    pub fn new(title: impl Into<String>, actual_price: f64, target_price: f64) -> Self {
        Self {
            title: title.into(),
            actual_price,
            target_price,
            reduced: is_price_reduced(target_price, actual_price),
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub fn notification_title(&self) -> String {
        REDUCED_TITLE.into()
    }

    pub fn notification_message(&self) -> String {
        format!(
            "The price of the item {} has gone down to {:.2}",
            self.title, self.actual_price
        )
    }
}

//! Cart panel shown in the modal.

use askama::Template;
use larek_core::Price;

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/basket.html")]
pub struct BasketView {
    items: Vec<String>,
    total: Price,
}

impl BasketView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with pre-rendered cart rows.
    pub fn set_items(&mut self, rows: Vec<String>) {
        self.items = rows;
    }

    pub const fn set_total(&mut self, total: Price) {
        self.total = total;
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_basket_disables_checkout() {
        let html = BasketView::new().render().unwrap();
        assert!(html.contains("Basket is empty"));
        assert!(html.contains("disabled"));
        assert!(html.contains("0 synapses"));
    }

    #[test]
    fn test_rows_and_total() {
        let mut basket = BasketView::new();
        basket.set_items(vec!["<li>row</li>".to_string()]);
        basket.set_total(Price::from_units(2200));

        let html = basket.render().unwrap();
        assert!(html.contains("<li>row</li>"));
        assert!(html.contains("2200 synapses"));
        assert!(!html.contains("disabled"));
    }
}

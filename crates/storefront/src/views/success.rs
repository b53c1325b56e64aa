//! Order confirmation.

use askama::Template;
use larek_core::Price;

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/success.html")]
pub struct SuccessView {
    total: Price,
}

impl SuccessView {
    pub const fn set_total(&mut self, total: Price) {
        self.total = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shows_charged_total() {
        let mut view = SuccessView::default();
        view.set_total(Price::from_units(2950));
        assert!(view.render().unwrap().contains("Charged 2950 synapses"));
    }
}

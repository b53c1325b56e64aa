//! In-memory application state: catalog, cart, preview and order draft.
//!
//! Every mutation recomputes its derived values synchronously and announces
//! itself through an [`Emitter`]; the model never talks to views directly.

use larek_core::{
    CatalogItem, FormErrors, OrderDraft, OrderField, OrderFieldError, OrderRequest, Price,
    ProductId,
};

use crate::events::{AppEvent, Emitter};

/// Storefront state for one visitor.
#[derive(Debug, Clone, Default)]
pub struct AppModel {
    catalog: Vec<CatalogItem>,
    basket: Vec<CatalogItem>,
    preview: Option<ProductId>,
    order: OrderDraft,
    form_errors: FormErrors,
}

impl AppModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Replace the catalog. Emits `items:changed`.
    pub fn set_catalog(&mut self, items: Vec<CatalogItem>, events: &mut impl Emitter<AppEvent>) {
        self.catalog = items;
        events.emit(AppEvent::ItemsChanged);
    }

    #[must_use]
    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    /// Look up a catalog item by id.
    #[must_use]
    pub fn find_item(&self, id: &ProductId) -> Option<&CatalogItem> {
        self.catalog.iter().find(|item| &item.id == id)
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    /// Select the item shown in the preview. Emits `preview:changed`.
    pub fn set_preview(&mut self, item: &CatalogItem, events: &mut impl Emitter<AppEvent>) {
        self.preview = Some(item.id.clone());
        events.emit(AppEvent::PreviewChanged(Box::new(item.clone())));
    }

    /// The item currently in preview, if it is still in the catalog.
    #[must_use]
    pub fn preview(&self) -> Option<&CatalogItem> {
        self.preview.as_ref().and_then(|id| self.find_item(id))
    }

    // -------------------------------------------------------------------------
    // Basket
    // -------------------------------------------------------------------------

    /// Append an item to the cart. Duplicates are allowed. Emits
    /// `basket:changed`.
    pub fn add_to_basket(&mut self, item: CatalogItem, events: &mut impl Emitter<AppEvent>) {
        self.basket.push(item);
        self.sync_order_items();
        events.emit(AppEvent::BasketChanged);
    }

    /// Remove the first cart entry with this id. Emits `basket:changed` and
    /// returns `true` if an entry was removed.
    pub fn remove_from_basket(
        &mut self,
        id: &ProductId,
        events: &mut impl Emitter<AppEvent>,
    ) -> bool {
        let Some(index) = self.basket.iter().position(|item| &item.id == id) else {
            return false;
        };
        self.basket.remove(index);
        self.sync_order_items();
        events.emit(AppEvent::BasketChanged);
        true
    }

    /// Empty the cart. Emits `basket:changed`.
    pub fn clear_basket(&mut self, events: &mut impl Emitter<AppEvent>) {
        self.basket.clear();
        self.sync_order_items();
        events.emit(AppEvent::BasketChanged);
    }

    #[must_use]
    pub fn basket(&self) -> &[CatalogItem] {
        &self.basket
    }

    #[must_use]
    pub fn basket_count(&self) -> usize {
        self.basket.len()
    }

    /// Sum of cart prices; priceless entries count as zero.
    #[must_use]
    pub fn basket_total(&self) -> Price {
        self.basket.iter().map(CatalogItem::price_or_zero).sum()
    }

    #[must_use]
    pub fn in_basket(&self, id: &ProductId) -> bool {
        self.basket.iter().any(|item| &item.id == id)
    }

    fn sync_order_items(&mut self) {
        self.order.items = self
            .basket
            .iter()
            .filter(|item| item.is_purchasable())
            .map(|item| item.id.clone())
            .collect();
        self.order.total = self.basket_total();
    }

    // -------------------------------------------------------------------------
    // Order
    // -------------------------------------------------------------------------

    /// Write one order field from form input and revalidate the whole draft.
    ///
    /// Emits `formErrors:change`, followed by `order:ready` when the draft has
    /// no errors left.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be stored in the field (unknown
    /// payment method). The draft and errors are left unchanged in that case.
    pub fn set_order_field(
        &mut self,
        field: OrderField,
        value: &str,
        events: &mut impl Emitter<AppEvent>,
    ) -> Result<(), OrderFieldError> {
        self.order.set_field(field, value)?;
        if self.validate_order(events) {
            events.emit(AppEvent::OrderReady);
        }
        Ok(())
    }

    /// Recompute every validation error from scratch. Emits
    /// `formErrors:change` and returns whether the draft is valid.
    pub fn validate_order(&mut self, events: &mut impl Emitter<AppEvent>) -> bool {
        self.form_errors = self.order.validate();
        events.emit(AppEvent::FormErrorsChanged(self.form_errors.clone()));
        self.form_errors.is_empty()
    }

    /// Blank the draft after a submission, keeping cart-derived fields.
    pub fn reset_order(&mut self) {
        self.order = OrderDraft::default();
        self.form_errors = FormErrors::default();
        self.sync_order_items();
    }

    #[must_use]
    pub const fn order(&self) -> &OrderDraft {
        &self.order
    }

    #[must_use]
    pub const fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    /// The `POST /order` body, if the draft is complete and the cart holds
    /// something to buy.
    #[must_use]
    pub fn order_request(&self) -> Option<OrderRequest> {
        if self.order.items.is_empty() {
            return None;
        }
        self.order.to_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larek_core::PaymentMethod;

    fn item(id: &str, price: Option<i64>) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            category: "soft-skill".to_string(),
            price: price.map(Price::from_units),
            image: format!("/{id}.svg"),
            description: String::new(),
        }
    }

    fn fill_order(model: &mut AppModel, events: &mut Vec<AppEvent>) {
        model.set_order_field(OrderField::Payment, "cash", events).unwrap();
        model.set_order_field(OrderField::Address, "Moscow", events).unwrap();
        model.set_order_field(OrderField::Email, "a@b.c", events).unwrap();
        model.set_order_field(OrderField::Phone, "+7 900 000 00 00", events).unwrap();
    }

    #[test]
    fn test_set_catalog_emits_items_changed() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.set_catalog(vec![item("a", Some(1)), item("b", None)], &mut events);

        assert_eq!(events, vec![AppEvent::ItemsChanged]);
        assert_eq!(model.catalog().len(), 2);
        assert!(model.find_item(&ProductId::new("b")).is_some());
        assert!(model.find_item(&ProductId::new("z")).is_none());
    }

    #[test]
    fn test_set_preview() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        let a = item("a", Some(100));
        model.set_catalog(vec![a.clone()], &mut events);
        events.clear();

        model.set_preview(&a, &mut events);
        assert_eq!(events, vec![AppEvent::PreviewChanged(Box::new(a.clone()))]);
        assert_eq!(model.preview(), Some(&a));
    }

    #[test]
    fn test_adding_n_items_sums_prices() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        let prices = [750, 1450, 2500, 480];
        for (i, price) in prices.iter().enumerate() {
            model.add_to_basket(item(&i.to_string(), Some(*price)), &mut events);
        }

        assert_eq!(model.basket_count(), prices.len());
        assert_eq!(model.basket_total(), Price::from_units(prices.iter().sum()));
        assert_eq!(events.len(), prices.len());
        assert!(events.iter().all(|e| *e == AppEvent::BasketChanged));
        assert_eq!(model.order().total, model.basket_total());
        assert_eq!(model.order().items.len(), prices.len());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(10)), &mut events);
        model.add_to_basket(item("a", Some(10)), &mut events);
        assert_eq!(model.basket_count(), 2);
        assert_eq!(model.basket_total(), Price::from_units(20));
    }

    #[test]
    fn test_remove_drops_exactly_one_match() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(10)), &mut events);
        model.add_to_basket(item("b", Some(20)), &mut events);
        model.add_to_basket(item("a", Some(10)), &mut events);
        model.add_to_basket(item("c", Some(30)), &mut events);
        events.clear();

        assert!(model.remove_from_basket(&ProductId::new("a"), &mut events));
        let ids: Vec<&str> = model.basket().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(model.basket_total(), Price::from_units(60));
        assert_eq!(events, vec![AppEvent::BasketChanged]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(10)), &mut events);
        events.clear();

        assert!(!model.remove_from_basket(&ProductId::new("zzz"), &mut events));
        assert_eq!(model.basket_count(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_clear_basket_resets_count_and_total() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(10)), &mut events);
        model.add_to_basket(item("b", Some(20)), &mut events);

        model.clear_basket(&mut events);
        assert_eq!(model.basket_count(), 0);
        assert_eq!(model.basket_total().to_string(), "0 synapses");
        assert!(model.order().items.is_empty());
        assert_eq!(events.last(), Some(&AppEvent::BasketChanged));
    }

    #[test]
    fn test_priceless_items_are_not_ordered() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(10)), &mut events);
        model.add_to_basket(item("free", None), &mut events);

        assert_eq!(model.order().items, vec![ProductId::new("a")]);
        assert_eq!(model.order().total, Price::from_units(10));
    }

    #[test]
    fn test_field_change_emits_errors_then_ready() {
        let mut model = AppModel::new();
        let mut events = Vec::new();

        model
            .set_order_field(OrderField::Address, "Moscow", &mut events)
            .unwrap();
        let [AppEvent::FormErrorsChanged(errors)] = events.as_slice() else {
            panic!("expected a single formErrors:change, got {events:?}");
        };
        assert_eq!(errors.len(), 3);
        assert!(!errors.contains(OrderField::Address));

        events.clear();
        fill_order(&mut model, &mut events);
        assert_eq!(events.last(), Some(&AppEvent::OrderReady));
        assert_eq!(
            events.iter().filter(|e| **e == AppEvent::OrderReady).count(),
            1
        );
        assert!(model.form_errors().is_empty());
        assert_eq!(model.order().payment, Some(PaymentMethod::Cash));
    }

    #[test]
    fn test_clearing_a_field_reports_it_again() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        fill_order(&mut model, &mut events);
        events.clear();

        model.set_order_field(OrderField::Email, "", &mut events).unwrap();
        assert_eq!(events.len(), 1);
        assert!(model.form_errors().contains(OrderField::Email));
        assert_eq!(model.form_errors().len(), 1);
    }

    #[test]
    fn test_invalid_payment_leaves_state_untouched() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        let result = model.set_order_field(OrderField::Payment, "barter", &mut events);

        assert!(result.is_err());
        assert!(events.is_empty());
        assert!(model.order().payment.is_none());
    }

    #[test]
    fn test_order_request_requires_items_and_fields() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        fill_order(&mut model, &mut events);
        assert!(model.order_request().is_none());

        model.add_to_basket(item("a", Some(750)), &mut events);
        let request = model.order_request().unwrap();
        assert_eq!(request.items, vec![ProductId::new("a")]);
        assert_eq!(request.total, Price::from_units(750));
        assert_eq!(request.payment, PaymentMethod::Cash);
    }

    #[test]
    fn test_reset_order_keeps_cart_fields() {
        let mut model = AppModel::new();
        let mut events = Vec::new();
        model.add_to_basket(item("a", Some(5)), &mut events);
        fill_order(&mut model, &mut events);

        model.reset_order();
        assert!(model.order().address.is_empty());
        assert!(model.order().payment.is_none());
        assert_eq!(model.order().items, vec![ProductId::new("a")]);
        assert!(model.form_errors().is_empty());
    }
}

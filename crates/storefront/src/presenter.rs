//! Presenter: wires the model and views together through the event bus.
//!
//! A [`Storefront`] is one visitor's application: model, views and the bus
//! subscriptions between them. User interactions enter through
//! [`Storefront::handle`]. Handlers run synchronously; when one of them needs
//! the backend (order submission) it queues an [`Effect`] that the async
//! driver executes after the dispatch, feeding the result back as an event.

use askama::Template;
use larek_core::{OrderRequest, Price, ProductId};

use crate::api::ShopApi;
use crate::events::{AppEvent, Emitter, EventBus, EventPattern, Outbox, names};
use crate::model::AppModel;
use crate::views::{
    AppView, BasketView, CardView, ContactsFormView, ModalView, OrderFormView, PageView,
    SuccessView, render_child,
};

/// What the modal is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalContent {
    #[default]
    None,
    Preview(ProductId),
    Basket,
    Order,
    Contacts,
    Success,
}

/// Asynchronous work requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitOrder(OrderRequest),
}

/// Model and views of one storefront; the context every handler mutates.
#[derive(Debug, Default)]
pub struct Shop {
    pub model: AppModel,
    pub page: PageView,
    pub modal: ModalView,
    pub basket: BasketView,
    pub order_form: OrderFormView,
    pub contacts_form: ContactsFormView,
    pub success: SuccessView,
    modal_content: ModalContent,
    effects: Vec<Effect>,
}

impl Shop {
    #[must_use]
    pub const fn modal_content(&self) -> &ModalContent {
        &self.modal_content
    }

    /// Render the markup for a kind of modal content from current state.
    fn render_content(&self, content: &ModalContent) -> String {
        match content {
            ModalContent::None => String::new(),
            ModalContent::Preview(id) => self.model.find_item(id).map_or_else(String::new, |item| {
                render_child(
                    &CardView::preview(item, self.model.in_basket(id)),
                    "card_preview",
                )
            }),
            ModalContent::Basket => render_child(&self.basket, "basket"),
            ModalContent::Order => render_child(&self.order_form, "order_form"),
            ModalContent::Contacts => render_child(&self.contacts_form, "contacts_form"),
            ModalContent::Success => render_child(&self.success, "success"),
        }
    }

    /// Put `content` into the modal and open it.
    fn show(&mut self, content: ModalContent, events: &mut impl Emitter<AppEvent>) {
        let markup = self.render_content(&content);
        self.modal.set_content(markup);
        self.modal_content = content;
        self.modal.open(events);
    }

    /// Re-render the open modal's content after state it shows has changed.
    fn refresh_modal(&mut self) {
        if self.modal.is_open() {
            let markup = self.render_content(&self.modal_content);
            self.modal.set_content(markup);
        }
    }

    fn render_gallery(&mut self) {
        let cards = self
            .model
            .catalog()
            .iter()
            .map(|item| render_child(&CardView::gallery(item), "card_gallery"))
            .collect();
        self.page.set_gallery(cards);
    }

    fn render_basket(&mut self) {
        let rows = self
            .model
            .basket()
            .iter()
            .enumerate()
            .map(|(i, item)| render_child(&CardView::basket_row(item, i + 1), "card_basket"))
            .collect();
        self.basket.set_items(rows);
        self.basket.set_total(self.model.basket_total());
        self.page.set_counter(self.model.basket_count());
    }
}

/// One visitor's storefront application.
pub struct Storefront {
    bus: EventBus<Shop, AppEvent>,
    shop: Shop,
    booted: bool,
}

impl Storefront {
    /// Create a storefront with every subscription registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bus: build_bus(),
            shop: Shop::default(),
            booted: false,
        }
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Whether the catalog has been loaded.
    #[must_use]
    pub const fn is_booted(&self) -> bool {
        self.booted
    }

    /// Load the catalog from the backend. Failures are logged and leave the
    /// gallery empty; the next call tries again.
    pub async fn boot<A: ShopApi>(&mut self, api: &A) {
        match api.product_list().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "catalog loaded");
                self.bus
                    .run(&mut self.shop, |shop, out| shop.model.set_catalog(items, out));
                self.booted = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load catalog");
            }
        }
    }

    /// Publish an event synchronously, without running effects.
    pub fn dispatch(&mut self, event: AppEvent) -> usize {
        self.bus.dispatch(&mut self.shop, event)
    }

    /// Publish an event, then run the effects its handlers requested.
    pub async fn handle<A: ShopApi>(&mut self, event: AppEvent, api: &A) {
        self.dispatch(event);
        self.run_effects(api).await;
    }

    async fn run_effects<A: ShopApi>(&mut self, api: &A) {
        while !self.shop.effects.is_empty() {
            for effect in std::mem::take(&mut self.shop.effects) {
                match effect {
                    Effect::SubmitOrder(order) => {
                        let event = match api.order_products(&order).await {
                            Ok(result) if result.total <= Price::ZERO => AppEvent::OrderFailed(
                                format!("order {} charged nothing", result.id),
                            ),
                            Ok(result) => AppEvent::OrderPlaced(result),
                            Err(e) => AppEvent::OrderFailed(e.to_string()),
                        };
                        self.dispatch(event);
                    }
                }
            }
        }
    }

    /// Render the application root (page and modal).
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render(&self) -> askama::Result<String> {
        let page = self.shop.page.render()?;
        let modal = self.shop.modal.render()?;
        AppView {
            page: &page,
            modal: &modal,
        }
        .render()
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("subscribers", &self.bus.len())
            .field("shop", &self.shop)
            .field("booted", &self.booted)
            .finish()
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

type Out = Outbox<AppEvent>;

#[allow(clippy::too_many_lines)]
fn build_bus() -> EventBus<Shop, AppEvent> {
    let mut bus = EventBus::new();

    // Model -> views

    bus.on(names::ITEMS_CHANGED, |shop: &mut Shop, _: &AppEvent, _: &mut Out| {
        shop.render_gallery();
    });

    bus.on(names::PREVIEW_CHANGED, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
        if let AppEvent::PreviewChanged(item) = event {
            shop.show(ModalContent::Preview(item.id.clone()), out);
        }
    });

    bus.on(names::BASKET_CHANGED, |shop: &mut Shop, _: &AppEvent, _: &mut Out| {
        shop.render_basket();
        shop.refresh_modal();
    });

    bus.on(names::FORM_ERRORS_CHANGE, |shop: &mut Shop, event: &AppEvent, _: &mut Out| {
        if let AppEvent::FormErrorsChanged(errors) = event {
            shop.order_form.set_errors(errors);
            shop.contacts_form.set_errors(errors);
            shop.refresh_modal();
        }
    });

    // User interactions -> model

    bus.on(names::CARD_SELECT, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
        if let AppEvent::CardSelect(id) = event {
            match shop.model.find_item(id).cloned() {
                Some(item) => shop.model.set_preview(&item, out),
                None => tracing::warn!(id = %id, "selected card is not in the catalog"),
            }
        }
    });

    bus.on(names::CARD_TOGGLE, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
        let AppEvent::CardToggle(id) = event else {
            return;
        };
        if shop.model.in_basket(id) {
            shop.model.remove_from_basket(id, out);
            return;
        }
        match shop.model.find_item(id).cloned() {
            Some(item) if item.is_purchasable() => shop.model.add_to_basket(item, out),
            Some(_) => tracing::debug!(id = %id, "ignoring priceless item"),
            None => tracing::warn!(id = %id, "toggled card is not in the catalog"),
        }
    });

    bus.on(names::BASKET_OPEN, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        shop.render_basket();
        shop.show(ModalContent::Basket, out);
    });

    bus.on(names::BASKET_REMOVE, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
        if let AppEvent::BasketRemove(id) = event {
            shop.model.remove_from_basket(id, out);
        }
    });

    bus.on(names::ORDER_OPEN, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        if shop.model.basket_count() == 0 {
            return;
        }
        shop.order_form.reset(shop.model.order());
        shop.show(ModalContent::Order, out);
    });

    match EventPattern::regex(names::ORDER_FIELD_CHANGE) {
        Ok(pattern) => {
            bus.on(pattern, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
                let AppEvent::OrderFieldChange { field, value } = event else {
                    return;
                };
                if let Err(e) = shop.model.set_order_field(*field, value, out) {
                    tracing::warn!(error = %e, "rejected order field input");
                    return;
                }
                shop.order_form.set_values(shop.model.order());
                shop.contacts_form.set_values(shop.model.order());
            });
        }
        Err(e) => tracing::error!(error = %e, "invalid order field pattern"),
    }

    bus.on(names::ORDER_SUBMIT, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        if !shop.order_form.state().valid() {
            return;
        }
        shop.contacts_form.reset(shop.model.order());
        shop.show(ModalContent::Contacts, out);
    });

    bus.on(names::CONTACTS_SUBMIT, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        match shop.model.order_request() {
            Some(order) => shop.effects.push(Effect::SubmitOrder(order)),
            None => {
                // Surface whatever is still missing
                shop.model.validate_order(out);
            }
        }
    });

    // Backend results

    bus.on(names::ORDER_PLACED, |shop: &mut Shop, event: &AppEvent, out: &mut Out| {
        if let AppEvent::OrderPlaced(result) = event {
            shop.model.clear_basket(out);
            shop.model.reset_order();
            shop.order_form.reset(shop.model.order());
            shop.contacts_form.reset(shop.model.order());
            shop.success.set_total(result.total);
            shop.show(ModalContent::Success, out);
        }
    });

    // A refused order leaves basket, draft and contacts form as they were
    bus.on(names::ORDER_FAILED, |_: &mut Shop, event: &AppEvent, _: &mut Out| {
        if let AppEvent::OrderFailed(message) = event {
            tracing::error!(error = %message, "order submission failed");
        }
    });

    // Modal lifecycle

    bus.on(names::MODAL_DISMISS, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        shop.modal.close(out);
    });

    bus.on(names::SUCCESS_CLOSE, |shop: &mut Shop, _: &AppEvent, out: &mut Out| {
        shop.modal.close(out);
    });

    bus.on(names::MODAL_OPEN, |shop: &mut Shop, _: &AppEvent, _: &mut Out| {
        shop.page.set_locked(true);
    });

    bus.on(names::MODAL_CLOSE, |shop: &mut Shop, _: &AppEvent, _: &mut Out| {
        shop.page.set_locked(false);
        shop.modal_content = ModalContent::None;
    });

    bus
}

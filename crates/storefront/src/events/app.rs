//! Events exchanged between the storefront model, views and presenter.

use std::borrow::Cow;

use larek_core::{CatalogItem, FormErrors, OrderField, OrderResult, ProductId};

use super::bus::BusEvent;

/// Event names, shared by emitters and subscribers.
pub mod names {
    pub const ITEMS_CHANGED: &str = "items:changed";
    pub const PREVIEW_CHANGED: &str = "preview:changed";
    pub const BASKET_CHANGED: &str = "basket:changed";
    pub const FORM_ERRORS_CHANGE: &str = "formErrors:change";
    pub const ORDER_READY: &str = "order:ready";
    pub const CARD_SELECT: &str = "card:select";
    pub const CARD_TOGGLE: &str = "card:toggle";
    pub const BASKET_OPEN: &str = "basket:open";
    pub const BASKET_REMOVE: &str = "basket:remove";
    pub const ORDER_OPEN: &str = "order:open";
    /// Matches every `order.<field>:change` event.
    pub const ORDER_FIELD_CHANGE: &str = r"^order\..+:change$";
    pub const ORDER_SUBMIT: &str = "order:submit";
    pub const CONTACTS_SUBMIT: &str = "contacts:submit";
    pub const ORDER_PLACED: &str = "order:placed";
    pub const ORDER_FAILED: &str = "order:failed";
    pub const MODAL_OPEN: &str = "modal:open";
    pub const MODAL_CLOSE: &str = "modal:close";
    pub const MODAL_DISMISS: &str = "modal:dismiss";
    pub const SUCCESS_CLOSE: &str = "success:close";
}

/// Everything that can happen in the storefront.
///
/// Model events announce state changes, view events carry user interactions,
/// and the `Order*` result events come back from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // Model changes
    ItemsChanged,
    PreviewChanged(Box<CatalogItem>),
    BasketChanged,
    FormErrorsChanged(FormErrors),
    OrderReady,

    // User interactions
    CardSelect(ProductId),
    CardToggle(ProductId),
    BasketOpen,
    BasketRemove(ProductId),
    OrderOpen,
    OrderFieldChange { field: OrderField, value: String },
    OrderSubmit,
    ContactsSubmit,
    ModalDismiss,
    SuccessClose,

    // Modal lifecycle
    ModalOpen,
    ModalClose,

    // Backend results
    OrderPlaced(OrderResult),
    OrderFailed(String),
}

impl BusEvent for AppEvent {
    fn name(&self) -> Cow<'_, str> {
        use names::*;

        let name = match self {
            Self::ItemsChanged => ITEMS_CHANGED,
            Self::PreviewChanged(_) => PREVIEW_CHANGED,
            Self::BasketChanged => BASKET_CHANGED,
            Self::FormErrorsChanged(_) => FORM_ERRORS_CHANGE,
            Self::OrderReady => ORDER_READY,
            Self::CardSelect(_) => CARD_SELECT,
            Self::CardToggle(_) => CARD_TOGGLE,
            Self::BasketOpen => BASKET_OPEN,
            Self::BasketRemove(_) => BASKET_REMOVE,
            Self::OrderOpen => ORDER_OPEN,
            Self::OrderFieldChange { field, .. } => {
                return Cow::Owned(format!("order.{field}:change"));
            }
            Self::OrderSubmit => ORDER_SUBMIT,
            Self::ContactsSubmit => CONTACTS_SUBMIT,
            Self::ModalDismiss => MODAL_DISMISS,
            Self::SuccessClose => SUCCESS_CLOSE,
            Self::ModalOpen => MODAL_OPEN,
            Self::ModalClose => MODAL_CLOSE,
            Self::OrderPlaced(_) => ORDER_PLACED,
            Self::OrderFailed(_) => ORDER_FAILED,
        };
        Cow::Borrowed(name)
    }
}

//! Presentational components.
//!
//! Each view owns one markup subtree and exposes setters that write into it.
//! Views never reach into each other or into the model: the presenter copies
//! state in through setters and user interactions come back as bus events.
//!
//! Markup is produced with askama templates under `templates/components`.

pub mod basket;
pub mod card;
pub mod contacts;
pub mod form;
pub mod modal;
pub mod order;
pub mod page;
pub mod success;

use askama::Template;

pub use basket::BasketView;
pub use card::{CardVariant, CardView};
pub use contacts::ContactsFormView;
pub use form::FormState;
pub use modal::ModalView;
pub use order::OrderFormView;
pub use page::PageView;
pub use success::SuccessView;

/// The swappable application root: page plus modal layer.
#[derive(Template)]
#[template(path = "components/app.html")]
pub struct AppView<'a> {
    pub page: &'a str,
    pub modal: &'a str,
}

/// Render a child component to markup for embedding in a parent view.
///
/// A child that fails to render is logged and left out rather than failing
/// the whole page.
pub fn render_child(component: &impl Template, component_name: &'static str) -> String {
    component.render().unwrap_or_else(|e| {
        tracing::error!(component = component_name, error = %e, "failed to render component");
        String::new()
    })
}

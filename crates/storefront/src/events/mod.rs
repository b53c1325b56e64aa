//! Event bus connecting the storefront model, views and presenter.
//!
//! - [`EventBus`] - synchronous publish/subscribe keyed by event name
//! - [`EventPattern`] - exact, regular-expression or wildcard subscriptions
//! - [`AppEvent`] - every event the storefront publishes

mod app;
mod bus;

pub use app::{AppEvent, names};
pub use bus::{BusEvent, Emitter, EventBus, EventPattern, Outbox, SubscriberId};

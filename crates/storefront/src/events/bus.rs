//! Synchronous publish/subscribe bus keyed by event name.
//!
//! The bus does not own the state its handlers mutate. Callers pass the
//! context in on every dispatch, which lets handlers take `&mut` access to
//! the presenter without shared ownership.
//!
//! Delivery rules:
//! - handlers for a single event run in registration order
//! - events emitted by a handler are queued and delivered after the current
//!   event has reached every subscriber (FIFO)
//! - `dispatch` returns only once the queue is drained

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

use regex::Regex;

/// Upper bound on events delivered by one `dispatch`, guards handler cycles.
const MAX_EVENTS_PER_DISPATCH: usize = 10_000;

/// An event that can travel over the bus.
pub trait BusEvent {
    /// Name used for subscription matching, e.g. `"basket:changed"`.
    fn name(&self) -> Cow<'_, str>;
}

/// Something events can be emitted into.
///
/// Model and view mutations take `&mut impl Emitter<E>` so they can announce
/// changes without holding a reference to the bus.
pub trait Emitter<E> {
    fn emit(&mut self, event: E);
}

impl<E> Emitter<E> for Vec<E> {
    fn emit(&mut self, event: E) {
        self.push(event);
    }
}

/// Queue of events emitted while a dispatch is in progress.
#[derive(Debug)]
pub struct Outbox<E> {
    queue: VecDeque<E>,
}

impl<E> Outbox<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn pop(&mut self) -> Option<E> {
        self.queue.pop_front()
    }
}

impl<E> Default for Outbox<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Emitter<E> for Outbox<E> {
    fn emit(&mut self, event: E) {
        self.queue.push_back(event);
    }
}

/// Which event names a subscription receives.
#[derive(Clone)]
pub enum EventPattern {
    /// Exactly one event name.
    Exact(String),
    /// Every event whose name matches the expression.
    Matches(Regex),
    /// Every event.
    All,
}

impl EventPattern {
    /// Build a regular-expression pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Matches)
    }

    /// Whether an event name is matched.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Matches(re) => re.is_match(name),
            Self::All => true,
        }
    }
}

impl fmt::Debug for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "Exact({name})"),
            Self::Matches(re) => write!(f, "Matches({})", re.as_str()),
            Self::All => f.write_str("All"),
        }
    }
}

/// `"*"` subscribes to everything, any other string is an exact name.
impl From<&str> for EventPattern {
    fn from(name: &str) -> Self {
        if name == "*" {
            Self::All
        } else {
            Self::Exact(name.to_string())
        }
    }
}

impl From<Regex> for EventPattern {
    fn from(re: Regex) -> Self {
        Self::Matches(re)
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Handler<C, E> = Box<dyn Fn(&mut C, &E, &mut Outbox<E>) + Send + Sync>;

struct Subscriber<C, E> {
    id: SubscriberId,
    pattern: EventPattern,
    handler: Handler<C, E>,
}

/// Publish/subscribe bus dispatching events of type `E` into a context `C`.
pub struct EventBus<C, E> {
    subscribers: Vec<Subscriber<C, E>>,
    next_id: u64,
}

impl<C, E: BusEvent> EventBus<C, E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe a handler to every event matching `pattern`.
    pub fn on<F>(&mut self, pattern: impl Into<EventPattern>, handler: F) -> SubscriberId
    where
        F: Fn(&mut C, &E, &mut Outbox<E>) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            pattern: pattern.into(),
            handler: Box::new(handler),
        });
        id
    }

    /// Subscribe a handler to every event.
    pub fn on_all<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&mut C, &E, &mut Outbox<E>) + Send + Sync + 'static,
    {
        self.on(EventPattern::All, handler)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn off(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id);
        self.subscribers.len() != before
    }

    /// Remove every subscription.
    pub fn off_all(&mut self) {
        self.subscribers.clear();
    }

    /// Whether any subscriber would receive an event with this name.
    #[must_use]
    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscribers.iter().any(|sub| sub.pattern.matches(name))
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver `event` and everything it causes. Returns the number of events
    /// delivered.
    pub fn dispatch(&self, ctx: &mut C, event: E) -> usize {
        let mut outbox = Outbox::new();
        outbox.emit(event);
        self.drain(ctx, outbox)
    }

    /// Run `f` against the context, then deliver whatever it emitted.
    ///
    /// This is how state mutations that happen outside a handler (for example
    /// after a network call completes) announce their change events.
    pub fn run<F>(&self, ctx: &mut C, f: F) -> usize
    where
        F: FnOnce(&mut C, &mut Outbox<E>),
    {
        let mut outbox = Outbox::new();
        f(ctx, &mut outbox);
        self.drain(ctx, outbox)
    }

    fn drain(&self, ctx: &mut C, mut outbox: Outbox<E>) -> usize {
        let mut delivered = 0;
        while let Some(event) = outbox.pop() {
            if delivered == MAX_EVENTS_PER_DISPATCH {
                tracing::warn!(
                    pending = outbox.len() + 1,
                    "event dispatch limit reached, dropping remaining events"
                );
                break;
            }
            delivered += 1;

            let name = event.name();
            tracing::trace!(event = %name, "dispatching event");
            for sub in self.subscribers.iter().filter(|sub| sub.pattern.matches(&name)) {
                (sub.handler)(ctx, &event, &mut outbox);
            }
        }
        delivered
    }
}

impl<C, E: BusEvent> Default for EventBus<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

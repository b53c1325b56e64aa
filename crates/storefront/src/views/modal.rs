//! Modal dialog holding one content fragment at a time.

use askama::Template;

use crate::events::{AppEvent, Emitter};

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/modal.html")]
pub struct ModalView {
    open: bool,
    content: String,
}

impl ModalView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Show the modal. Emits `modal:open` when it was closed.
    pub fn open(&mut self, events: &mut impl Emitter<AppEvent>) {
        if !self.open {
            self.open = true;
            events.emit(AppEvent::ModalOpen);
        }
    }

    /// Hide the modal and drop its content. Emits `modal:close` when it was
    /// open.
    pub fn close(&mut self, events: &mut impl Emitter<AppEvent>) {
        if self.open {
            self.open = false;
            self.content.clear();
            events.emit(AppEvent::ModalClose);
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_emit_once() {
        let mut modal = ModalView::new();
        let mut events = Vec::new();

        modal.set_content("<p>hi</p>".to_string());
        modal.open(&mut events);
        modal.open(&mut events);
        assert!(modal.is_open());
        assert!(modal.render().unwrap().contains("modal_active"));
        assert!(modal.render().unwrap().contains("<p>hi</p>"));

        modal.close(&mut events);
        modal.close(&mut events);
        assert!(!modal.is_open());
        assert!(modal.content().is_empty());
        assert_eq!(events, vec![AppEvent::ModalOpen, AppEvent::ModalClose]);
    }
}

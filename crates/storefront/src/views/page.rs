//! Page shell: catalog gallery, cart counter and scroll lock.

use askama::Template;

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/page.html")]
pub struct PageView {
    counter: usize,
    gallery: Vec<String>,
    locked: bool,
}

impl PageView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn set_counter(&mut self, counter: usize) {
        self.counter = counter;
    }

    /// Replace the gallery with pre-rendered cards.
    pub fn set_gallery(&mut self, cards: Vec<String>) {
        self.gallery = cards;
    }

    /// Lock page scrolling while a modal is open.
    pub const fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub const fn counter(&self) -> usize {
        self.counter
    }

    #[must_use]
    pub fn gallery_len(&self) -> usize {
        self.gallery.len()
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_counter_and_cards() {
        let mut page = PageView::new();
        page.set_counter(3);
        page.set_gallery(vec!["<b>one</b>".to_string(), "<b>two</b>".to_string()]);

        let html = page.render().unwrap();
        assert!(html.contains("header__basket-counter\">3<"));
        assert!(html.contains("<b>one</b>"));
        assert!(html.contains("<b>two</b>"));
        assert!(!html.contains("page__wrapper_locked"));
    }

    #[test]
    fn test_locked_modifier() {
        let mut page = PageView::new();
        page.set_locked(true);
        assert!(page.is_locked());
        assert!(page.render().unwrap().contains("page__wrapper_locked"));
    }
}

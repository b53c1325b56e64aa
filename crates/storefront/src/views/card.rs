//! Catalog item card in its three placements.

use askama::Template;
use larek_core::{CatalogItem, Price};

use crate::filters;

/// Where a card is shown; each placement renders different markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    /// Tile in the catalog gallery; clicking it opens the preview.
    Gallery,
    /// Full card in the modal with the buy/remove button.
    Preview,
    /// Row in the cart list with a delete button.
    Basket,
}

#[derive(Template, Debug, Clone)]
#[template(path = "components/card.html")]
pub struct CardView {
    variant: CardVariant,
    id: String,
    title: String,
    category: String,
    image: String,
    price: Option<Price>,
    description: String,
    in_basket: bool,
    index: usize,
}

impl CardView {
    fn from_item(variant: CardVariant, item: &CatalogItem) -> Self {
        Self {
            variant,
            id: item.id.to_string(),
            title: item.title.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            price: item.price,
            description: item.description.clone(),
            in_basket: false,
            index: 0,
        }
    }

    #[must_use]
    pub fn gallery(item: &CatalogItem) -> Self {
        Self::from_item(CardVariant::Gallery, item)
    }

    #[must_use]
    pub fn preview(item: &CatalogItem, in_basket: bool) -> Self {
        let mut card = Self::from_item(CardVariant::Preview, item);
        card.set_in_basket(in_basket);
        card
    }

    /// Cart row; `index` is the 1-based position shown to the visitor.
    #[must_use]
    pub fn basket_row(item: &CatalogItem, index: usize) -> Self {
        let mut card = Self::from_item(CardVariant::Basket, item);
        card.index = index;
        card
    }

    pub const fn set_in_basket(&mut self, in_basket: bool) {
        self.in_basket = in_basket;
    }

    #[must_use]
    pub const fn variant(&self) -> CardVariant {
        self.variant
    }

    #[must_use]
    pub fn price_text(&self) -> String {
        self.price
            .map_or_else(|| "Priceless".to_string(), |price| price.to_string())
    }

    /// Priceless items cannot be bought.
    #[must_use]
    pub const fn button_disabled(&self) -> bool {
        self.price.is_none()
    }

    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.price.is_none() {
            "Not for sale"
        } else if self.in_basket {
            "Remove from basket"
        } else {
            "Buy"
        }
    }
}

//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// CSS modifier for a catalog category badge.
///
/// The backend sends localized category names; both the Russian and English
/// spellings are recognized. Unknown categories fall back to `other`.
#[must_use]
pub fn category_modifier_for(category: &str) -> &'static str {
    match category.trim().to_lowercase().as_str() {
        "софт-скил" | "soft-skill" | "soft skill" => "soft",
        "хард-скил" | "hard-skill" | "hard skill" => "hard",
        "дополнительное" | "additional" => "additional",
        "кнопка" | "button" => "button",
        _ => "other",
    }
}

/// Returns the CSS modifier for a category.
///
/// Usage in templates: `card__category_{{ category|category_modifier }}`
#[askama::filter_fn]
pub fn category_modifier(
    category: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(category_modifier_for(&category.to_string()))
}

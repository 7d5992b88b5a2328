//! Near-expiry popup shown once per session until the user dismisses it.

use super::dto::OwnedIngredient;

pub const TITLE: &str = "내 식재료 관리";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Hidden,
    Shown,
    Closing,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct ExpiryNotification {
    items: Vec<OwnedIngredient>,
    display: Display,
    dismissed: bool,
}

impl ExpiryNotification {
    /// `dismissed` carries the user's earlier "close" across restarts.
    pub fn new(items: Vec<OwnedIngredient>, dismissed: bool) -> Self {
        Self {
            items,
            display: Display::Hidden,
            dismissed,
        }
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn items(&self) -> &[OwnedIngredient] {
        &self.items
    }

    /// Returns whether the popup is now visible.
    pub fn show(&mut self) -> bool {
        if self.dismissed || self.items.is_empty() {
            return false;
        }
        if self.display == Display::Hidden {
            self.display = Display::Shown;
        }
        self.display == Display::Shown
    }

    /// Starts the fade-out and remembers the dismissal.
    pub fn close(&mut self) {
        if matches!(self.display, Display::Shown | Display::Hidden) {
            self.display = Display::Closing;
        }
        self.dismissed = true;
    }

    pub fn finish_animation(&mut self) {
        if self.display == Display::Closing {
            self.display = Display::Closed;
        }
    }

    /// `우유(2개), 두부, 달걀(10구)`
    pub fn message(&self) -> String {
        self.items
            .iter()
            .map(|i| {
                if i.quantity.is_empty() {
                    i.ing_name.clone()
                } else {
                    format!("{}({})", i.ing_name, i.quantity)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

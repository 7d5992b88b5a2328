//! D-day labels and near-expiry flags.

use std::fmt;

use time::Date;

use super::dto::OwnedIngredient;

/// Records with this many days left, or fewer, are flagged.
pub const NEAR_EXPIRY_DAYS: i64 = 3;

pub const NEAR_EXPIRY_MESSAGE: &str = "소비기한이 임박했습니다!";

pub const WARNING_ICON: &str = "!";

/// Whole calendar days from `today` until `target`; negative once elapsed.
pub fn remaining_days(target: Date, today: Date) -> i64 {
    (target - today).whole_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DDay {
    pub days: i64,
}

impl DDay {
    pub fn between(target: Date, today: Date) -> Self {
        Self {
            days: remaining_days(target, today),
        }
    }

    pub fn label(&self) -> String {
        if self.days >= 0 {
            format!("D - {}", self.days)
        } else {
            format!("D + {}", self.days.abs())
        }
    }

    pub fn is_near_expiry(&self) -> bool {
        self.is_near_expiry_with(NEAR_EXPIRY_DAYS)
    }

    pub fn is_near_expiry_with(&self, threshold: i64) -> bool {
        self.days <= threshold
    }
}

impl fmt::Display for DDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub dday: DDay,
    pub near_expiry: bool,
}

impl ExpiryStatus {
    pub fn warning_icon(&self) -> Option<&'static str> {
        self.near_expiry.then_some(WARNING_ICON)
    }

    pub fn alert_message(&self) -> Option<&'static str> {
        self.near_expiry.then_some(NEAR_EXPIRY_MESSAGE)
    }
}

/// `None` when the record carries no expiration date.
pub fn expiry_status(item: &OwnedIngredient, today: Date, threshold: i64) -> Option<ExpiryStatus> {
    let dday = DDay::between(item.exp_date?, today);
    Some(ExpiryStatus {
        dday,
        near_expiry: dday.is_near_expiry_with(threshold),
    })
}

pub fn near_expiry<'a>(
    items: &'a [OwnedIngredient],
    today: Date,
    threshold: i64,
) -> Vec<&'a OwnedIngredient> {
    items
        .iter()
        .filter(|i| expiry_status(i, today, threshold).is_some_and(|s| s.near_expiry))
        .collect()
}

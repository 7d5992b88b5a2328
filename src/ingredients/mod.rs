pub mod dto;
pub mod expiry;
pub mod grouping;
pub mod inventory;
pub mod notification;
pub mod services;

pub use dto::{OwnedIngredient, OwnedIngredientForm, SortMode};
pub use expiry::{expiry_status, DDay, ExpiryStatus};
pub use grouping::{group_by_category, CategoryGroup, CollapseState, GroupedInventory};
pub use inventory::InventoryView;
pub use notification::ExpiryNotification;
pub use services::IngredientLookup;

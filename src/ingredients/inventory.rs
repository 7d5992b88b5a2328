//! "My ingredients" screen state.
//!
//! The view only mirrors what the server returns: sorting happens server-side
//! via `sortNo`, and a delete is followed by a refetch instead of removing the
//! row locally.

use std::sync::Arc;

use time::Date;
use tokio::sync::Mutex;
use tracing::debug;

use super::dto::{OwnedIngredient, SortMode};
use super::expiry::near_expiry;
use super::grouping::{group_by_category, CollapseState, GroupedInventory};
use super::services;
use crate::error::Result;
use crate::http::ApiClient;
use crate::query::QueryGeneration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryQuery {
    pub sort: SortMode,
    pub keyword: String,
}

#[derive(Debug, Default)]
struct ViewState {
    query: InventoryQuery,
    inventory: GroupedInventory,
    collapse: CollapseState,
}

#[derive(Clone)]
pub struct InventoryView {
    api: ApiClient,
    user_no: i64,
    near_expiry_days: i64,
    generation: QueryGeneration,
    state: Arc<Mutex<ViewState>>,
}

impl InventoryView {
    pub fn new(api: ApiClient, user_no: i64, near_expiry_days: i64) -> Self {
        Self {
            api,
            user_no,
            near_expiry_days,
            generation: QueryGeneration::new(),
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Builds a view for the logged-in user.
    pub fn for_session(api: ApiClient, near_expiry_days: i64) -> Result<Self> {
        let user = api.session().require_user()?;
        Ok(Self::new(api, user.user_no, near_expiry_days))
    }

    pub async fn query(&self) -> InventoryQuery {
        self.state.lock().await.query.clone()
    }

    /// Refetches with the current query. `Ok(false)` means a newer fetch won.
    pub async fn refresh(&self) -> Result<bool> {
        let query = self.query().await;
        let ticket = self.generation.begin();
        let keyword = Some(query.keyword.as_str());
        let fetched = services::list_owned(&self.api, self.user_no, query.sort, keyword).await;

        // ticket is re-checked while holding the state lock
        let mut state = self.state.lock().await;
        if !ticket.is_current() {
            debug!(ticket = ticket.id(), "inventory response superseded");
            return Ok(false);
        }
        let inventory = group_by_category(fetched?);
        state.collapse.reset_for(&inventory);
        state.inventory = inventory;
        Ok(true)
    }

    pub async fn search(&self, keyword: &str) -> Result<bool> {
        self.state.lock().await.query.keyword = keyword.trim().to_string();
        self.refresh().await
    }

    pub async fn set_sort(&self, sort: SortMode) -> Result<bool> {
        self.state.lock().await.query.sort = sort;
        self.refresh().await
    }

    /// Deletes on the server, then refetches the list.
    pub async fn delete(&self, ing_no: i64) -> Result<()> {
        services::delete_owned(&self.api, ing_no, self.user_no).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn inventory(&self) -> GroupedInventory {
        self.state.lock().await.inventory.clone()
    }

    pub async fn toggle(&self, category: &str) {
        self.state.lock().await.collapse.toggle(category);
    }

    pub async fn is_collapsed(&self, category: &str) -> bool {
        self.state.lock().await.collapse.is_collapsed(category)
    }

    pub async fn near_expiry(&self, today: Date) -> Vec<OwnedIngredient> {
        let state = self.state.lock().await;
        let items: Vec<OwnedIngredient> = state.inventory.items().cloned().collect();
        near_expiry(&items, today, self.near_expiry_days)
            .into_iter()
            .cloned()
            .collect()
    }
}

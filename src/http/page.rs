use serde::{Deserialize, Serialize};

/// Paging metadata attached to every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub list_count: u32,
    pub current_page: u32,
    pub page_limit: u32,
    pub item_limit: u32,
    pub max_page: u32,
    pub start_page: u32,
    pub end_page: u32,
}

impl PageInfo {
    /// Page numbers shown in the pager, `start_page..=end_page`.
    pub fn pages(&self) -> Vec<u32> {
        if self.start_page == 0 || self.end_page < self.start_page {
            return Vec::new();
        }
        (self.start_page..=self.end_page).collect()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.max_page
    }

    pub fn is_empty(&self) -> bool {
        self.list_count == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    pub page_info: PageInfo,
}

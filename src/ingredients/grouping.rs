use std::collections::HashMap;

use super::dto::OwnedIngredient;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub code: i64,
    pub name: String,
    pub items: Vec<OwnedIngredient>,
}

/// Owned ingredients bucketed by category name, ordered by category code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedInventory {
    pub groups: Vec<CategoryGroup>,
}

impl GroupedInventory {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn items(&self) -> impl Iterator<Item = &OwnedIngredient> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }
}

/// Groups keep the server's record order; a group's code is that of its first record.
pub fn group_by_category(records: Vec<OwnedIngredient>) -> GroupedInventory {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for record in records {
        match index.get(&record.ing_code_name) {
            Some(&i) => groups[i].items.push(record),
            None => {
                index.insert(record.ing_code_name.clone(), groups.len());
                groups.push(CategoryGroup {
                    code: record.ing_code,
                    name: record.ing_code_name.clone(),
                    items: vec![record],
                });
            }
        }
    }
    // stable: equal codes keep first-seen order
    groups.sort_by_key(|g| g.code);
    GroupedInventory { groups }
}

/// Per-category collapse flags. Unknown categories count as expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashMap<String, bool>,
}

impl CollapseState {
    pub fn is_collapsed(&self, category: &str) -> bool {
        self.collapsed.get(category).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, category: &str) {
        let entry = self.collapsed.entry(category.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Expands every category of a freshly fetched inventory.
    pub fn reset_for(&mut self, inventory: &GroupedInventory) {
        self.collapsed = inventory.names().map(|n| (n.to_string(), false)).collect();
    }
}

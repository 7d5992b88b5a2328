use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::date::calendar_date;
use crate::http::Paged;

/// An ingredient the user owns, joined with its catalog name and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedIngredient {
    pub user_no: i64,
    pub ing_no: i64,
    #[serde(default, with = "calendar_date::option")]
    pub created_at: Option<Date>,
    #[serde(default, with = "calendar_date::option")]
    pub exp_date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub quantity: String,
    pub ing_name: String,
    pub ing_code: i64,
    pub ing_code_name: String,
}

/// Body for registering or editing an owned ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedIngredientForm {
    pub user_no: i64,
    pub ing_no: i64,
    #[serde(default, with = "calendar_date::option")]
    pub created_at: Option<Date>,
    #[serde(default, with = "calendar_date::option")]
    pub exp_date: Option<Date>,
    pub quantity: String,
}

impl From<&OwnedIngredient> for OwnedIngredientForm {
    fn from(i: &OwnedIngredient) -> Self {
        Self {
            user_no: i.user_no,
            ing_no: i.ing_no,
            created_at: i.created_at,
            exp_date: i.exp_date,
            quantity: i.quantity.clone(),
        }
    }
}

/// Server-side ordering of the owned-ingredient list, sent as `sortNo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Expiration,
    Registered,
    Name,
}

impl SortMode {
    pub fn sort_no(self) -> u8 {
        match self {
            SortMode::Expiration => 1,
            SortMode::Registered => 2,
            SortMode::Name => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Expiration => "소비기한순",
            SortMode::Registered => "등록일순",
            SortMode::Name => "재료명순",
        }
    }
}

/// Catalog ingredient, as picked from the ingredient search popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientItem {
    pub ing_no: i64,
    pub ing_name: String,
    pub ing_code: i64,
    pub ing_code_name: String,
    #[serde(default)]
    pub nutrient_no: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCode {
    pub ing_code: i64,
    pub ing_code_name: String,
}

/// Encyclopedia entry with per-100g nutrients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PediaEntry {
    pub ing_no: i64,
    pub ing_name: String,
    pub ing_code: i64,
    #[serde(default)]
    pub ing_code_name: String,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub carb: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub server_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PediaForm {
    pub ing_name: String,
    pub ing_code: i64,
    pub energy: Option<f64>,
    pub carb: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
}

/// Filters shared by the catalog and encyclopedia searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSearch {
    pub ing_code: Option<i64>,
    pub keyword: Option<String>,
    pub page: Option<u32>,
}

pub type PagedIngredients = Paged<IngredientItem>;
pub type PagedPedia = Paged<PediaEntry>;

/// The server sends `null` for an ingredient registered without a quantity.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::date::{calendar_date, format_ymd};
use crate::meals::nutrients::Nutrients;

/// Meal slots of a day, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    #[serde(rename = "BRK")]
    Breakfast,
    #[serde(rename = "LNC")]
    Lunch,
    #[serde(rename = "SNK")]
    Snack,
    #[serde(rename = "DIN")]
    Dinner,
    #[serde(rename = "MNS")]
    LateNight,
}

impl MealSlot {
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
        MealSlot::LateNight,
    ];

    pub fn code(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "BRK",
            MealSlot::Lunch => "LNC",
            MealSlot::Snack => "SNK",
            MealSlot::Dinner => "DIN",
            MealSlot::LateNight => "MNS",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "아침 식사",
            MealSlot::Lunch => "점심 식사",
            MealSlot::Snack => "간식",
            MealSlot::Dinner => "저녁 식사",
            MealSlot::LateNight => "야식",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    Food,
    Recipe,
}

/// One recorded item of a meal. Nutrient values are per 100 g; `quantity` is grams eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub meal_no: i64,
    #[serde(default, alias = "name")]
    pub food_name: String,
    #[serde(default)]
    pub meal_type: Option<SourceType>,
    #[serde(default)]
    pub ref_no: Option<i64>,
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
    pub quantity: Option<f64>,
}

/// Food search hit from the nutrition database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub food_no: i64,
    pub food_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub energy: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub carb: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub protein: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub fat: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub sodium: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCode {
    pub food_code: i64,
    pub food_code_name: String,
}

/// Body of `POST /mealplan/newMeal/{userNo}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealItem {
    #[serde(with = "calendar_date")]
    pub meal_date: Date,
    pub meal_id: MealSlot,
    pub meal_type: SourceType,
    pub ref_no: i64,
    pub quantity: f64,
}

impl NewMealItem {
    pub fn food(date: Date, slot: MealSlot, food: &FoodItem, grams: f64) -> Self {
        Self {
            meal_date: date,
            meal_id: slot,
            meal_type: SourceType::Food,
            ref_no: food.food_no,
            quantity: grams,
        }
    }
}

/// A day's entries keyed by slot code. Unknown slot codes are kept but never shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMeals(pub HashMap<String, Vec<MealEntry>>);

impl DayMeals {
    pub fn slot(&self, slot: MealSlot) -> &[MealEntry] {
        self.0.get(slot.code()).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per-day nutrient totals computed by the server, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealStats(pub BTreeMap<String, Nutrients>);

impl MealStats {
    pub fn get(&self, date: Date) -> Option<&Nutrients> {
        self.0.get(&format_ymd(date))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Chart rows in date order.
    pub fn series(&self) -> impl Iterator<Item = (&str, &Nutrients)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

pub(crate) fn nullable<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn day_meals_by_slot_code() {
        let meals: DayMeals = serde_json::from_value(json!({
            "BRK": [{ "mealNo": 1, "foodName": "토스트", "energy": 250.0, "quantity": 80.0 }],
            "DIN": [{ "mealNo": 2, "foodName": "김치찌개", "energy": null }]
        }))
        .unwrap();
        assert_eq!(meals.slot(MealSlot::Breakfast)[0].food_name, "토스트");
        assert_eq!(meals.slot(MealSlot::Dinner)[0].energy, None);
        assert!(meals.slot(MealSlot::Lunch).is_empty());
    }

    #[test]
    fn new_meal_body_shape() {
        let food = FoodItem {
            food_no: 42,
            food_name: "바나나".into(),
            energy: 89.0,
            carb: 23.0,
            protein: 1.1,
            fat: 0.3,
            sodium: 1.0,
        };
        let body = NewMealItem::food(date!(2025 - 03 - 07), MealSlot::Snack, &food, 120.0);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "mealDate": "2025-03-07",
                "mealId": "SNK",
                "mealType": "FOOD",
                "refNo": 42,
                "quantity": 120.0
            })
        );
    }

    #[test]
    fn stats_keyed_by_date() {
        let stats: MealStats = serde_json::from_value(json!({
            "2025-03-02": { "energy": 1800.0, "carbs": 210.0, "protein": 70.0, "fat": 50.0, "sodium": 1500.0 },
            "2025-03-01": { "energy": 2100.0 }
        }))
        .unwrap();
        let day = stats.get(date!(2025 - 03 - 02)).unwrap();
        assert_eq!(day.carb, 210.0);
        let keys: Vec<_> = stats.series().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2025-03-01", "2025-03-02"]);
        assert_eq!(stats.get(date!(2025 - 03 - 01)).unwrap().protein, 0.0);
    }
}

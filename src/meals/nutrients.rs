//! Nutrient totals for a day of meals.
//!
//! Entry values are per 100 g. An entry contributes `value * quantity / 100`,
//! with a missing quantity meaning 100 g and a missing value meaning 0.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::meals::dto::{nullable, MealEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Energy,
    Carb,
    Protein,
    Fat,
    Sodium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Energy,
        Nutrient::Carb,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Sodium,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Energy => "총 섭취량",
            Nutrient::Carb => "탄수화물",
            Nutrient::Protein => "단백질",
            Nutrient::Fat => "지방",
            Nutrient::Sodium => "나트륨",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            Nutrient::Sodium => "mg",
            _ => "g",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, deserialize_with = "nullable")]
    pub energy: f64,
    #[serde(default, alias = "carbs", deserialize_with = "nullable")]
    pub carb: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub protein: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub fat: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub sodium: f64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Energy => self.energy,
            Nutrient::Carb => self.carb,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Sodium => self.sodium,
        }
    }

    pub fn of_entry(entry: &MealEntry) -> Self {
        let factor = quantity_factor(entry.quantity);
        let scaled = |v: Option<f64>| v.unwrap_or(0.0) * factor;
        Self {
            energy: scaled(entry.energy),
            carb: scaled(entry.carb),
            protein: scaled(entry.protein),
            fat: scaled(entry.fat),
            sodium: scaled(entry.sodium),
        }
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(mut self, rhs: Nutrients) -> Nutrients {
        self += rhs;
        self
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Nutrients) {
        self.energy += rhs.energy;
        self.carb += rhs.carb;
        self.protein += rhs.protein;
        self.fat += rhs.fat;
        self.sodium += rhs.sodium;
    }
}

pub fn quantity_factor(quantity: Option<f64>) -> f64 {
    quantity.unwrap_or(100.0) / 100.0
}

pub fn sum_entries<'a, I>(entries: I) -> Nutrients
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    entries.into_iter().map(Nutrients::of_entry).fold(Nutrients::default(), Add::add)
}

/// Energy of one slot, as shown in the slot header.
pub fn slot_energy(entries: &[MealEntry]) -> f64 {
    sum_entries(entries).energy
}

/// Locally summed entries and the server's daily statistics, kept apart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyNutrients {
    pub local: Nutrients,
    pub server: Option<Nutrients>,
}

impl DailyNutrients {
    pub fn compose(local: Nutrients, server: Option<Nutrients>) -> Self {
        Self { local, server }
    }

    /// Energy always from the local sum; macros from the server when it has the day.
    pub fn totals(&self) -> Nutrients {
        match self.server {
            Some(server) => Nutrients {
                energy: self.local.energy,
                ..server
            },
            None => self.local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientGoals(pub Nutrients);

impl Default for NutrientGoals {
    fn default() -> Self {
        Self(Nutrients {
            energy: 2500.0,
            carb: 300.0,
            protein: 60.0,
            fat: 60.0,
            sodium: 2000.0,
        })
    }
}

impl NutrientGoals {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(nutrient)
    }
}

/// `100 * value / goal` clamped to `0..=100`. A zero goal gives 0.
pub fn percentage(value: f64, goal: f64) -> f64 {
    if goal == 0.0 {
        return 0.0;
    }
    let pct = value * 100.0 / goal;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub nutrient: Nutrient,
    pub value: f64,
    pub goal: f64,
    pub unit: &'static str,
    pub percent: f64,
}

impl ProgressBar {
    pub fn label(&self) -> String {
        format!(
            "{} {} / {} {}",
            self.nutrient.label(),
            self.value.round(),
            self.goal,
            self.unit
        )
    }
}

pub fn progress_bars(totals: &Nutrients, goals: &NutrientGoals) -> Vec<ProgressBar> {
    Nutrient::ALL
        .iter()
        .map(|&n| {
            let value = totals.get(n);
            let goal = goals.get(n);
            ProgressBar {
                nutrient: n,
                value,
                goal,
                unit: n.unit(),
                percent: percentage(value, goal),
            }
        })
        .collect()
}

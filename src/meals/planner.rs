//! Daily meal-plan screen: the selected day, its five slot sections and the
//! statistics range shown in the chart.

use time::{Date, Duration, Weekday};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::meals::dto::{FoodItem, MealEntry, MealSlot, MealStats, NewMealItem};
use crate::meals::nutrients::{
    progress_bars, slot_energy, sum_entries, DailyNutrients, NutrientGoals, Nutrients, ProgressBar,
};
use crate::meals::services;

pub const STATS_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct SlotSection {
    pub slot: MealSlot,
    pub is_expanded: bool,
    pub items: Vec<MealEntry>,
}

impl SlotSection {
    fn empty(slot: MealSlot) -> Self {
        Self {
            slot,
            is_expanded: false,
            items: Vec::new(),
        }
    }

    pub fn energy(&self) -> f64 {
        slot_energy(&self.items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRange {
    pub from: Date,
    pub to: Date,
}

impl StatsRange {
    /// The week before `today`, inclusive of both ends.
    pub fn last_week(today: Date) -> Self {
        Self {
            from: today - Duration::days(STATS_DAYS),
            to: today,
        }
    }
}

pub fn weekday_label(date: Date) -> &'static str {
    match date.weekday() {
        Weekday::Sunday => "일",
        Weekday::Monday => "월",
        Weekday::Tuesday => "화",
        Weekday::Wednesday => "수",
        Weekday::Thursday => "목",
        Weekday::Friday => "금",
        Weekday::Saturday => "토",
    }
}

pub struct DayPlanner {
    api: ApiClient,
    user_no: i64,
    selected: Date,
    sections: Vec<SlotSection>,
    range: StatsRange,
    stats: MealStats,
}

impl DayPlanner {
    pub fn new(api: ApiClient, user_no: i64, today: Date) -> Self {
        Self {
            api,
            user_no,
            selected: today,
            sections: MealSlot::ALL.iter().map(|&s| SlotSection::empty(s)).collect(),
            range: StatsRange::last_week(today),
            stats: MealStats::default(),
        }
    }

    pub fn for_session(api: ApiClient, today: Date) -> Result<Self> {
        let user = api.session().require_user()?;
        Ok(Self::new(api, user.user_no, today))
    }

    pub fn selected(&self) -> Date {
        self.selected
    }

    /// Picks another day. Call [`DayPlanner::load_day`] to fetch it.
    pub fn select(&mut self, date: Date) {
        self.selected = date;
    }

    /// Seven days centred on the selected one.
    pub fn week_strip(&self) -> Vec<Date> {
        (-3..=3).map(|i| self.selected + Duration::days(i)).collect()
    }

    pub fn sections(&self) -> &[SlotSection] {
        &self.sections
    }

    pub fn section(&self, slot: MealSlot) -> Option<&SlotSection> {
        self.sections.iter().find(|s| s.slot == slot)
    }

    pub fn toggle(&mut self, slot: MealSlot) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.slot == slot) {
            s.is_expanded = !s.is_expanded;
        }
    }

    pub fn range(&self) -> StatsRange {
        self.range
    }

    pub fn stats(&self) -> &MealStats {
        &self.stats
    }

    /// Replaces each slot's items with the selected day's entries. Expansion flags survive.
    pub async fn load_day(&mut self) -> Result<()> {
        let meals = services::fetch_meals(&self.api, self.user_no, self.selected).await?;
        for section in &mut self.sections {
            section.items = meals.slot(section.slot).to_vec();
        }
        debug!(date = %self.selected, "meal day loaded");
        Ok(())
    }

    pub async fn load_stats(&mut self) -> Result<()> {
        self.stats =
            services::fetch_stats(&self.api, self.user_no, self.range.from, self.range.to).await?;
        Ok(())
    }

    pub async fn set_range(&mut self, from: Date, to: Date) -> Result<()> {
        if from > to {
            return Err(ApiError::Validation("통계 시작일이 종료일보다 늦습니다.".into()));
        }
        self.range = StatsRange { from, to };
        self.load_stats().await
    }

    pub async fn add_item(&mut self, slot: MealSlot, food: &FoodItem, grams: f64) -> Result<()> {
        let item = NewMealItem::food(self.selected, slot, food, grams);
        services::save_meal_item(&self.api, self.user_no, &item).await?;
        self.load_day().await?;
        self.load_stats().await
    }

    /// Deletes on the server, then reloads the day and the statistics.
    pub async fn remove_item(&mut self, meal_no: i64) -> Result<()> {
        services::remove_meal_item(&self.api, meal_no).await?;
        self.load_day().await?;
        self.load_stats().await
    }

    pub fn local_totals(&self) -> Nutrients {
        sum_entries(self.sections.iter().flat_map(|s| s.items.iter()))
    }

    pub fn daily(&self) -> DailyNutrients {
        DailyNutrients::compose(self.local_totals(), self.stats.get(self.selected).copied())
    }

    pub fn progress(&self, goals: &NutrientGoals) -> Vec<ProgressBar> {
        progress_bars(&self.daily().totals(), goals)
    }
}

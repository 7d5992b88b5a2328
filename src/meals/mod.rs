pub mod dto;
pub mod nutrients;
pub mod planner;
pub mod services;

pub use dto::{DayMeals, FoodItem, MealEntry, MealSlot, MealStats, NewMealItem, SourceType};
pub use nutrients::{percentage, DailyNutrients, Nutrient, NutrientGoals, Nutrients, ProgressBar};
pub use planner::DayPlanner;
pub use services::FoodSearch;

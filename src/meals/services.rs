use time::Date;
use tracing::{info, instrument};

use crate::date::format_ymd;
use crate::error::{ApiError, Result};
use crate::http::{ApiClient, ApiRequest};
use crate::meals::dto::{DayMeals, FoodCode, FoodItem, MealStats, NewMealItem};
use crate::query::QueryGeneration;

const MEALPLAN: &str = "/mealplan";

#[instrument(skip(api))]
pub async fn fetch_meals(api: &ApiClient, user_no: i64, date: Date) -> Result<DayMeals> {
    let req = ApiRequest::get(format!("{MEALPLAN}/meals/{user_no}")).query("date", format_ymd(date));
    api.send_json(req).await
}

#[instrument(skip(api))]
pub async fn fetch_stats(api: &ApiClient, user_no: i64, from: Date, to: Date) -> Result<MealStats> {
    if from > to {
        return Err(ApiError::Validation("통계 시작일이 종료일보다 늦습니다.".into()));
    }
    let req = ApiRequest::get(format!("{MEALPLAN}/stats/{user_no}"))
        .query("fromDate", format_ymd(from))
        .query("toDate", format_ymd(to));
    api.send_json(req).await
}

#[instrument(skip(api))]
pub async fn search_foods(api: &ApiClient, query: &str, food_code: Option<i64>) -> Result<Vec<FoodItem>> {
    let req = ApiRequest::get(format!("{MEALPLAN}/foods"))
        .query("query", query)
        .query_opt("foodCode", food_code);
    api.send_json(req).await
}

pub async fn food_codes(api: &ApiClient) -> Result<Vec<FoodCode>> {
    api.send_json(ApiRequest::get(format!("{MEALPLAN}/foodCodes"))).await
}

#[instrument(skip(api, item), fields(slot = item.meal_id.code(), ref_no = item.ref_no))]
pub async fn save_meal_item(api: &ApiClient, user_no: i64, item: &NewMealItem) -> Result<()> {
    if item.quantity.is_nan() || item.quantity <= 0.0 {
        return Err(ApiError::Validation("섭취량을 입력해주세요.".into()));
    }
    let req = ApiRequest::post(format!("{MEALPLAN}/newMeal/{user_no}")).json(item)?;
    api.send_unit(req).await?;
    info!(user_no, "meal item saved");
    Ok(())
}

#[instrument(skip(api))]
pub async fn remove_meal_item(api: &ApiClient, meal_no: i64) -> Result<()> {
    api.send_unit(ApiRequest::delete(format!("{MEALPLAN}/meals/{meal_no}")))
        .await?;
    info!(meal_no, "meal item removed");
    Ok(())
}

/// Search-as-you-type over the food database. Only the newest keystroke's
/// results are returned; older responses come back as `None`.
#[derive(Clone)]
pub struct FoodSearch {
    api: ApiClient,
    generation: QueryGeneration,
}

impl FoodSearch {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            generation: QueryGeneration::new(),
        }
    }

    pub async fn search(&self, query: &str, food_code: Option<i64>) -> Result<Option<Vec<FoodItem>>> {
        let query = query.trim();
        if query.is_empty() && food_code.is_none() {
            self.generation.cancel();
            return Ok(Some(Vec::new()));
        }
        match self.generation.run(search_foods(&self.api, query, food_code)).await {
            Some(res) => res.map(Some),
            None => Ok(None),
        }
    }
}

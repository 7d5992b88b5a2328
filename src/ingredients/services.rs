use tracing::{info, instrument};

use super::dto::{
    CatalogSearch, IngredientCode, OwnedIngredient, OwnedIngredientForm, PagedIngredients,
    PagedPedia, PediaEntry, PediaForm, SortMode,
};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::query::QueryGeneration;

const MY_INGS: &str = "/api/inglist";
const CATALOG: &str = "/ingdata";
const PEDIA: &str = "/ingpedia";

// --- owned ingredients ---

#[instrument(skip(api))]
pub async fn list_owned(
    api: &ApiClient,
    user_no: i64,
    sort: SortMode,
    keyword: Option<&str>,
) -> Result<Vec<OwnedIngredient>> {
    let req = ApiRequest::get(format!("{MY_INGS}/{user_no}"))
        .query("userNo", user_no)
        .query("sortNo", sort.sort_no())
        .query_opt("keyword", keyword);
    api.send_json(req).await
}

#[instrument(skip(api))]
pub async fn get_owned(api: &ApiClient, ing_no: i64, user_no: i64) -> Result<OwnedIngredient> {
    api.send_json(ApiRequest::get(format!("{MY_INGS}/detail/{ing_no}/{user_no}")))
        .await
}

#[instrument(skip(api, form), fields(ing_no = form.ing_no))]
pub async fn insert_owned(api: &ApiClient, form: &OwnedIngredientForm) -> Result<()> {
    let req = ApiRequest::post(format!("{MY_INGS}/detail")).json(form)?;
    api.send_unit(req).await?;
    info!(user_no = form.user_no, "owned ingredient registered");
    Ok(())
}

#[instrument(skip(api, form))]
pub async fn update_owned(
    api: &ApiClient,
    ing_no: i64,
    user_no: i64,
    form: &OwnedIngredientForm,
) -> Result<()> {
    let req = ApiRequest::put(format!("{MY_INGS}/detail/{ing_no}/{user_no}")).json(form)?;
    api.send_unit(req).await
}

#[instrument(skip(api))]
pub async fn delete_owned(api: &ApiClient, ing_no: i64, user_no: i64) -> Result<()> {
    api.send_unit(ApiRequest::delete(format!("{MY_INGS}/detail/{ing_no}/{user_no}")))
        .await?;
    info!(ing_no, user_no, "owned ingredient deleted");
    Ok(())
}

// --- catalog ---

pub async fn ingredient_codes(api: &ApiClient) -> Result<Vec<IngredientCode>> {
    api.send_json(ApiRequest::get(format!("{CATALOG}/codes"))).await
}

fn with_search(req: ApiRequest, search: &CatalogSearch) -> ApiRequest {
    req.query_opt("ingCode", search.ing_code)
        .query_opt("keyword", search.keyword.as_deref())
        .query_opt("page", search.page)
}

#[instrument(skip(api))]
pub async fn search_catalog(api: &ApiClient, search: &CatalogSearch) -> Result<PagedIngredients> {
    api.send_json(with_search(ApiRequest::get(CATALOG), search))
        .await
}

/// Ingredient picker search. A response is dropped once a newer search started.
#[derive(Clone)]
pub struct IngredientLookup {
    api: ApiClient,
    generation: QueryGeneration,
}

impl IngredientLookup {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            generation: QueryGeneration::new(),
        }
    }

    pub async fn search(&self, search: &CatalogSearch) -> Result<Option<PagedIngredients>> {
        match self.generation.run(search_catalog(&self.api, search)).await {
            Some(res) => res.map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel(&self) {
        self.generation.cancel();
    }
}

// --- encyclopedia ---

#[instrument(skip(api))]
pub async fn search_pedia(api: &ApiClient, search: &CatalogSearch) -> Result<PagedPedia> {
    api.send_json(with_search(ApiRequest::get(PEDIA), search)).await
}

pub async fn get_pedia(api: &ApiClient, ing_no: i64) -> Result<PediaEntry> {
    api.send_json(ApiRequest::get(format!("{PEDIA}/detail/{ing_no}")))
        .await
}

#[instrument(skip(api, form), fields(ing_name = %form.ing_name))]
pub async fn create_pedia(api: &ApiClient, form: &PediaForm) -> Result<()> {
    api.send_unit(ApiRequest::post(PEDIA).json(form)?).await
}

#[instrument(skip(api, form))]
pub async fn update_pedia(api: &ApiClient, ing_no: i64, form: &PediaForm) -> Result<()> {
    api.send_unit(ApiRequest::put(format!("{PEDIA}/detail/{ing_no}")).json(form)?)
        .await
}

#[instrument(skip(api))]
pub async fn delete_pedia(api: &ApiClient, ing_no: i64) -> Result<()> {
    api.send_unit(ApiRequest::delete(format!("{PEDIA}/detail/{ing_no}")))
        .await
}

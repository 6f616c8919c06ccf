//! Search API Handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::{AppError, AppResult, ServerState};
use crate::geo::Coordinate;
use crate::search::{EnrichedRestaurant, SearchQuery, SearchService};

/// GET /search 查询参数
///
/// lat/lon 必须成对出现；所有字段在分发前校验。
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub cuisine: Option<String>,
    pub min_rating: Option<f64>,
}

impl SearchParams {
    fn into_query(self) -> AppResult<SearchQuery> {
        let center = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(
                    "lat and lon must be provided together",
                ));
            }
        };

        Ok(SearchQuery {
            text: self.q,
            cuisine: self.cuisine,
            center,
            radius_km: self.radius_km,
            min_rating: self.min_rating,
        })
    }
}

/// GET /search - 组合查询 (文本/菜系/地理/评分)
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<EnrichedRestaurant>>> {
    let query = params.into_query()?;
    let service = SearchService::new(state.store.clone());
    Ok(Json(service.search(query).await?))
}

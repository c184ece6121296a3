//! Handlers for the grocery endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/groceries` | `?tag&subtag` required (else `[]`); optional `consumed`, `from_date`, `to_date` |
//! | `POST` | `/grocery` | Body: [`NewGroceryItem`]; returns 201 + `{"success":true,"id":..}` |
//! | `POST` | `/grocery/consume/{item_id}` | Returns `{"success":true,"changes":n}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use pantry_core::{GroceryItem, GroceryStore, ListingRequest, NewGroceryItem, relative};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// Listing query parameters. A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct ListParams {
  pub tag:       Option<String>,
  pub subtag:    Option<String>,
  /// `true` (any case) lists consumed items; anything else lists stock.
  pub consumed:  Option<String>,
  /// Relative offset such as `7d`, `3w` or `1m`.
  pub from_date: Option<String>,
  pub to_date:   Option<String>,
}

impl ListParams {
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "tag" => &mut params.tag,
        "subtag" => &mut params.subtag,
        "consumed" => &mut params.consumed,
        "from_date" => &mut params.from_date,
        "to_date" => &mut params.to_date,
        _ => continue,
      };
      slot.get_or_insert(value);
    }
    params
  }
}

impl From<ListParams> for ListingRequest {
  fn from(p: ListParams) -> Self {
    ListingRequest {
      tag:           p.tag,
      subtag:        p.subtag,
      show_consumed: p
        .consumed
        .is_some_and(|c| c.eq_ignore_ascii_case("true")),
      from_date:     p.from_date,
      to_date:       p.to_date,
    }
  }
}

/// `GET /groceries?tag=..&subtag=..[&consumed=true][&from_date=7d][&to_date=1d]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<GroceryItem>>, ApiError>
where
  S: GroceryStore,
{
  let Query(pairs) = pairs?;
  let params = ListParams::from_pairs(pairs);
  let Some(filter) = ListingRequest::from(params).resolve(relative::today())
  else {
    return Ok(Json(Vec::new()));
  };

  let items = store.list(&filter).await.map_err(ApiError::store)?;
  tracing::debug!(tags = %filter.tags, consumed = filter.consumed, count = items.len(), "listed groceries");
  Ok(Json(items))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedBody {
  pub success: bool,
  pub id:      i64,
}

/// `POST /grocery` — returns 201 + `{"success": true, "id": <id>}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewGroceryItem>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GroceryStore,
{
  let Json(body) = body?;
  let item = store.add(body).await.map_err(ApiError::store)?;
  tracing::info!(id = item.id, tags = %item.tags, "added grocery item");
  Ok((StatusCode::CREATED, Json(CreatedBody { success: true, id: item.id })))
}

// ─── Consume ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumedBody {
  pub success: bool,
  pub changes: usize,
}

/// `POST /grocery/consume/{item_id}`
pub async fn consume<S>(
  State(store): State<Arc<S>>,
  item_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ConsumedBody>, ApiError>
where
  S: GroceryStore,
{
  let Path(item_id) = item_id?;
  let changes = store.consume(item_id).await.map_err(ApiError::store)?;
  tracing::info!(id = item_id, changes, "consumed grocery item");
  Ok(Json(ConsumedBody { success: true, changes }))
}

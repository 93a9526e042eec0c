use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use engine::query::vectorize;
use engine::rank::{search, Page, SortOrder};
use engine::Index;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Search request body. `query` and the paging fields are taken as raw
/// JSON values so a malformed field degrades to its default instead of
/// failing body extraction; only a missing or non-string query is a
/// client error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub per_page: Option<Value>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

pub fn build_app(index: Arc<Index>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", post(search_handler))
        .with_state(AppState { index })
        .layer(cors)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Page>, (StatusCode, Json<Value>)> {
    let raw_query = match req.query.as_ref().and_then(Value::as_str) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing or invalid 'query'" })),
            ))
        }
    };

    let sort = SortOrder::parse(req.sort.as_deref());
    let page = positive_int(req.page.as_ref(), 1);
    let per_page = positive_int(req.per_page.as_ref(), 10);

    let (query_vector, query_magnitude) = vectorize(raw_query, &state.index);
    let result = search(&state.index, &query_vector, query_magnitude, sort, page, per_page);
    Ok(Json(result))
}

// Paging parameters: numbers and numeric strings are accepted;
// non-numeric or non-positive values fall back to the default.
fn positive_int(value: Option<&Value>, default: usize) -> usize {
    let parsed = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    match parsed {
        Some(f) if f.is_finite() && f >= 1.0 => f as usize,
        _ => default,
    }
}

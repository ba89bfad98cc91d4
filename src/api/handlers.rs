//! API handlers

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::{ApiError, AppState, RequestContext};
use crate::catalog::CatalogSearch;
use crate::types::{Filter, Planet, PlanetId, PlanetRequest, INVALID_ID_MESSAGE};
use crate::Error;

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Register a planet known to the catalog
///
/// Responds `201` with `Location: v1/planets/<id>`, or `404` with an empty
/// body when the catalog has no such planet.
pub async fn create_planet(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: PlanetRequest = serde_json::from_slice(&body).map_err(|e| {
        let error = Error::InvalidRequest(format!("error unmarshalling the request body: {}", e));
        ctx.log_info(&error.to_string());
        ApiError::from(error)
    })?;

    // An empty search matches every catalog entry
    if request.name.trim().is_empty() {
        let error = Error::InvalidRequest("planet name is required".to_string());
        ctx.log_info(&error.to_string());
        return Err(ApiError::from(error));
    }

    let search = state
        .catalog
        .lookup_by_name(&request.name)
        .await
        .map_err(|e| {
            ctx.log_error(&e, "error getting planets from catalog");
            ApiError::internal(&e)
        })?;

    // No response and an empty result page both mean the catalog does not know the planet
    let Some(appearance_quantity) = search.as_ref().and_then(CatalogSearch::appearance_quantity)
    else {
        ctx.log_planet_info(&request.name, "planet not found");
        return Err(ApiError::not_found());
    };

    let planet = Planet {
        id: PlanetId::new(),
        name: request.name,
        weather: request.weather,
        land: request.land,
        appearance_quantity,
    };

    let saved = state
        .store_call("save planet", state.store.save(planet))
        .await
        .map_err(|e| {
            ctx.log_error(&e, "error creating planet");
            ApiError::internal(&e)
        })?;

    tracing::debug!(id = %saved.id, planet = %saved.name, appearance_quantity, "Planet created");

    Ok((
        StatusCode::CREATED,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::LOCATION, format!("v1/planets/{}", saved.id)),
        ],
    )
        .into_response())
}

/// List planets, optionally filtered by exact name
pub async fn list_planets(
    State(state): State<AppState>,
    ctx: RequestContext,
    filter: Result<Query<Filter>, QueryRejection>,
) -> Result<Json<Vec<Planet>>, ApiError> {
    let Query(filter) = filter.map_err(|e| {
        let message = e.body_text();
        ctx.log_info(&message);
        ApiError::bad_request(message)
    })?;

    let planets = state
        .store_call("list planets", state.store.find_all(&filter))
        .await
        .map_err(|e| {
            ctx.log_error(&e, "error listing planets");
            ApiError::internal(&e)
        })?;

    Ok(Json(planets))
}

/// Fetch one planet
pub async fn get_planet(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(planet_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_planet_id(&ctx, &planet_id)?;

    let found = state
        .store_call("find planet", state.store.find_by_id(id))
        .await
        .map_err(|e| {
            ctx.log_error(&e, "error finding planet");
            ApiError::internal(&e)
        })?;

    match found {
        Some(planet) => Ok(Json(planet).into_response()),
        None => {
            ctx.log_info("planet not found");
            if state.options.null_body_for_missing_planet {
                Ok(Json(Option::<Planet>::None).into_response())
            } else {
                Err(ApiError::not_found())
            }
        }
    }
}

/// Remove one planet; unknown ids succeed
pub async fn delete_planet(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(planet_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_planet_id(&ctx, &planet_id)?;

    state
        .store_call("delete planet", state.store.delete(id))
        .await
        .map_err(|e| {
            ctx.log_error(&e, "error deleting planet");
            ApiError::internal(&e)
        })?;

    Ok((
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    )
        .into_response())
}

fn parse_planet_id(ctx: &RequestContext, raw: &str) -> Result<PlanetId, ApiError> {
    raw.parse().map_err(|_| {
        ctx.log_info(INVALID_ID_MESSAGE);
        ApiError::bad_request(INVALID_ID_MESSAGE)
    })
}

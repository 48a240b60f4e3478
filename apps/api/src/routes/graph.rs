//! Axum route handlers for the company graph layout.
//!
//! Every endpoint is stateless: the caller sends the current snapshot of
//! companies and gets positions back. Persisting them is the caller's job.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::{AnimationSchedule, LegendRing};
use crate::models::company::CompanyNode;
use crate::models::relocation::{Placement, RelocationPlanEntry};
use crate::state::AppState;

/// Upper bound on companies per request; the search is quadratic in it.
pub const MAX_COMPANIES: usize = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LegendResponse {
    pub rings: Vec<LegendRing>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub companies: Vec<CompanyNode>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub nodes: Vec<CompanyNode>,
}

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    #[serde(default)]
    pub existing: Vec<CompanyNode>,
    pub company: CompanyNode,
}

#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub relocated_nodes: Vec<CompanyNode>,
    pub plans: Vec<RelocationPlanEntry>,
    pub stable_node_ids: Vec<i64>,
    pub visual_impact: f64,
    pub schedule: AnimationSchedule,
}

/// Either an explicit ring distance or a score to derive it from.
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub candidate_id: i64,
    pub target_distance: Option<f64>,
    pub score: Option<f64>,
    #[serde(default)]
    pub placed: Vec<CompanyNode>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/graph/legend
///
/// The score bands and the ring each one is drawn in.
pub async fn handle_legend(State(state): State<AppState>) -> Json<LegendResponse> {
    Json(LegendResponse {
        rings: state.engine.legend(),
    })
}

/// POST /api/v1/graph/layout
///
/// Full re-layout of a replaced company set. Prior positions are ignored.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    check_size(request.companies.len())?;

    let engine = state.engine.clone();
    let nodes = tokio::task::spawn_blocking(move || engine.layout_all(&request.companies))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(LayoutResponse { nodes }))
}

/// POST /api/v1/graph/insert
///
/// Inserts one company into an existing layout. Returns the full node list,
/// the moves to animate, their visual impact and a suggested schedule.
pub async fn handle_insert(
    State(state): State<AppState>,
    Json(request): Json<InsertRequest>,
) -> Result<Json<InsertResponse>, AppError> {
    check_size(request.existing.len() + 1)?;

    let company_id = request.company.id;
    let engine = state.engine.clone();
    let response = tokio::task::spawn_blocking(move || {
        let outcome = engine.plan_relocation(&request.company, &request.existing);
        let visual_impact = engine.estimate_impact(&outcome.plans);
        let schedule = engine.assign_animation_delays(&outcome.plans);
        InsertResponse {
            relocated_nodes: outcome.relocated_nodes,
            plans: outcome.plans,
            stable_node_ids: outcome.stable_node_ids,
            visual_impact,
            schedule,
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    tracing::info!(
        company_id,
        moved = response.plans.len(),
        stable = response.stable_node_ids.len(),
        visual_impact = response.visual_impact,
        "Planned company insert"
    );

    Ok(Json(response))
}

/// POST /api/v1/graph/position
///
/// Single collision-aware position search against `placed`.
pub async fn handle_position(
    State(state): State<AppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<Placement>, AppError> {
    check_size(request.placed.len())?;

    let target_distance = match (request.target_distance, request.score) {
        (Some(distance), _) if !distance.is_finite() || distance < 0.0 => {
            return Err(AppError::Validation(
                "target_distance must be a non-negative number".to_string(),
            ))
        }
        (Some(distance), _) => distance,
        (None, Some(score)) => state.engine.distance_for_score(score),
        (None, None) => {
            return Err(AppError::Validation(
                "either target_distance or score is required".to_string(),
            ))
        }
    };

    let engine = state.engine.clone();
    let placement = tokio::task::spawn_blocking(move || {
        engine.find_position(target_distance, request.candidate_id, &request.placed)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(placement))
}

fn check_size(count: usize) -> Result<(), AppError> {
    if count > MAX_COMPANIES {
        return Err(AppError::Validation(format!(
            "at most {MAX_COMPANIES} companies per request, got {count}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

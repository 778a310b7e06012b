use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with every facade endpoint.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health))
        .route(
            "/patients",
            post(handler::create_patient).get(handler::list_patients),
        )
        .route(
            "/patients/:id",
            get(handler::read_patient)
                .put(handler::update_patient)
                .delete(handler::delete_patient),
        )
        .route("/patients/:id/exists", get(handler::patient_exists))
        .route(
            "/treatments",
            post(handler::create_treatment).get(handler::list_treatments),
        )
        .route(
            "/treatments/:id",
            get(handler::read_treatment)
                .put(handler::update_treatment)
                .delete(handler::delete_treatment),
        )
        .route("/treatments/:id/exists", get(handler::treatment_exists))
        .route(
            "/insurances",
            post(handler::create_insurance).get(handler::list_insurances),
        )
        .route(
            "/insurances/:id",
            get(handler::read_insurance)
                .put(handler::update_insurance)
                .delete(handler::delete_insurance),
        )
        .route(
            "/claims",
            post(handler::create_claim).get(handler::list_claims),
        )
        .route(
            "/claims/:id",
            get(handler::read_claim).delete(handler::delete_claim),
        )
        .route("/claims/:id/status", post(handler::transition_claim))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

pub mod analytics;
pub mod auth;
pub mod endpoints;
pub mod payments;
pub mod transactions;

use axum::{middleware, routing::*, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::appState::AppState;

//Builds the full application router. main.rs and the integration tests both go through here.
pub fn buildRouter(appState: AppState) -> Router {
    let payments: Router<AppState> = Router::new()
        .route("/", post(payments::makePayment))
        .route("/:paymentId", get(payments::getPayment))
        .route("/loans/:loanId", get(payments::getLoanPayments));

    let transactions: Router<AppState> = Router::new()
        .route("/disburse", post(transactions::disburseLoan));

    let analytics: Router<AppState> = Router::new()
        .route("/monthly-cash-flow", get(analytics::getMonthlyCashFlow));

    //All routes nested under /api (i.e /api/payments)
    let api: Router = Router::new()
        .nest("/payments", payments)
        .nest("/transactions", transactions)
        .nest("/Analytics", analytics)
        .layer(middleware::from_fn_with_state(appState.clone(), auth::sessionLayer))
        .with_state(appState);

    return Router::new()
        .route("/health", get(endpoints::health))
        .nest("/api", api)
        .fallback(endpoints::pageNotFound)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());
}

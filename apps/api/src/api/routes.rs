use std::sync::Arc;

use axum::{routing::get, Router};

use crate::api::handlers::{health, income};
use crate::domain::income::Income;
use crate::domain::repositories::IncomeRepository;

/// Builds the application router around an income repository
///
/// `DELETE` and `PATCH` are also mounted on the collection path so that a
/// request without an id is answered with `REQUIRE_ID` instead of 405.
pub fn router(repo: Arc<dyn IncomeRepository>) -> Router {
    let to_model = |record: Income| income::IncomeResponse::from(record);

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/income",
            income::list_income(repo.clone(), to_model)
                .merge(income::create_income(repo.clone()))
                .merge(income::remove_income(repo.clone()))
                .merge(income::edit_income(repo.clone())),
        )
        .route(
            "/api/income/:id",
            income::remove_income(repo.clone()).merge(income::edit_income(repo)),
        )
}

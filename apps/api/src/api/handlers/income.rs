//! Income endpoints
//!
//! Each factory takes its collaborators explicitly and returns a
//! [`MethodRouter`] whose handler owns them. A handler validates its input
//! in a fixed order, reports only the first failing check, and otherwise
//! delegates to the [`IncomeRepository`]. Repository failures are logged
//! and surface to the client as `500 {"code": "INTERNAL_ERROR"}`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, MethodRouter},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::errors::{ApiError, ErrorCode};
use crate::api::validation::{decimal_from_json, int_from_json, parse_int, present, text_field};
use crate::domain::income::{
    Amount, Income, IncomeId, IncomePatch, IncomeQueryRange, NewIncome, Timestamp,
};
use crate::domain::repositories::IncomeRepository;

/// Query string of the list endpoint
#[derive(Debug, Default)]
pub struct ListIncomeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ListIncomeQuery {
    /// Builds the query from raw key/value pairs
    ///
    /// A repeated key keeps its first value. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start" => &mut query.start,
                "end" => &mut query.end,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// JSON body of the edit and create endpoints
///
/// `None` means the key was missing from the body. A key set to `null`
/// is present and holds `Value::Null`.
#[derive(Debug, Default, Deserialize)]
pub struct IncomeRequest {
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
}

/// Public shape of an income record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeResponse {
    pub id: IncomeId,
    pub amount: Decimal,
    pub description: String,
    pub timestamp: i64,
    pub category: String,
}

impl From<Income> for IncomeResponse {
    fn from(income: Income) -> Self {
        Self {
            id: income.id,
            amount: income.amount,
            description: income.description,
            timestamp: income.timestamp,
            category: income.category,
        }
    }
}

/// Response from income creation
#[derive(Debug, Serialize)]
pub struct CreateIncomeResponse {
    pub id: IncomeId,
}

// ===== Errors =====

#[derive(Debug, Error)]
pub enum ListIncomeError {
    #[error("start must be an integer")]
    RequireStart,
    #[error("end must be an integer")]
    RequireEnd,
    #[error("failed to get income: {0}")]
    Repository(String),
}

impl ListIncomeError {
    fn code(&self) -> ErrorCode {
        match self {
            ListIncomeError::RequireStart => ErrorCode::RequireStart,
            ListIncomeError::RequireEnd => ErrorCode::RequireEnd,
            ListIncomeError::Repository(_) => ErrorCode::InternalError,
        }
    }
}

#[derive(Debug, Error)]
pub enum RemoveIncomeError {
    #[error("id is required")]
    RequireId,
    #[error("failed to remove income: {0}")]
    Repository(String),
}

impl RemoveIncomeError {
    fn code(&self) -> ErrorCode {
        match self {
            RemoveIncomeError::RequireId => ErrorCode::RequireId,
            RemoveIncomeError::Repository(_) => ErrorCode::InternalError,
        }
    }
}

#[derive(Debug, Error)]
pub enum EditIncomeError {
    #[error("id is required")]
    RequireId,
    #[error("description is required")]
    RequireDescription,
    #[error("timestamp must be an integer")]
    RequireTimestamp,
    #[error("timestamp must be between 0 and now")]
    InvalidTimestamp,
    #[error("category is required")]
    RequireCategory,
    #[error("failed to edit income: {0}")]
    Repository(String),
}

impl EditIncomeError {
    fn code(&self) -> ErrorCode {
        match self {
            EditIncomeError::RequireId => ErrorCode::RequireId,
            EditIncomeError::RequireDescription => ErrorCode::RequireDescription,
            EditIncomeError::RequireTimestamp => ErrorCode::RequireTimestamp,
            EditIncomeError::InvalidTimestamp => ErrorCode::InvalidTimestamp,
            EditIncomeError::RequireCategory => ErrorCode::RequireCategory,
            EditIncomeError::Repository(_) => ErrorCode::InternalError,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateIncomeError {
    #[error("amount is required")]
    RequireAmount,
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("description is required")]
    RequireDescription,
    #[error("timestamp must be an integer")]
    RequireTimestamp,
    #[error("timestamp must be between 0 and now")]
    InvalidTimestamp,
    #[error("category is required")]
    RequireCategory,
    #[error("failed to create income: {0}")]
    Repository(String),
}

impl CreateIncomeError {
    fn code(&self) -> ErrorCode {
        match self {
            CreateIncomeError::RequireAmount => ErrorCode::RequireAmount,
            CreateIncomeError::InvalidAmount => ErrorCode::InvalidAmount,
            CreateIncomeError::RequireDescription => ErrorCode::RequireDescription,
            CreateIncomeError::RequireTimestamp => ErrorCode::RequireTimestamp,
            CreateIncomeError::InvalidTimestamp => ErrorCode::InvalidTimestamp,
            CreateIncomeError::RequireCategory => ErrorCode::RequireCategory,
            CreateIncomeError::Repository(_) => ErrorCode::InternalError,
        }
    }
}

/// Field checks shared by edit and create, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryFieldError {
    RequireDescription,
    RequireTimestamp,
    InvalidTimestamp,
    RequireCategory,
}

impl From<EntryFieldError> for EditIncomeError {
    fn from(err: EntryFieldError) -> Self {
        match err {
            EntryFieldError::RequireDescription => EditIncomeError::RequireDescription,
            EntryFieldError::RequireTimestamp => EditIncomeError::RequireTimestamp,
            EntryFieldError::InvalidTimestamp => EditIncomeError::InvalidTimestamp,
            EntryFieldError::RequireCategory => EditIncomeError::RequireCategory,
        }
    }
}

impl From<EntryFieldError> for CreateIncomeError {
    fn from(err: EntryFieldError) -> Self {
        match err {
            EntryFieldError::RequireDescription => CreateIncomeError::RequireDescription,
            EntryFieldError::RequireTimestamp => CreateIncomeError::RequireTimestamp,
            EntryFieldError::InvalidTimestamp => CreateIncomeError::InvalidTimestamp,
            EntryFieldError::RequireCategory => CreateIncomeError::RequireCategory,
        }
    }
}

macro_rules! impl_error_response {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    match err.code() {
                        ErrorCode::InternalError => ApiError::internal_server_error(),
                        code => ApiError::bad_request(code),
                    }
                }
            }

            impl IntoResponse for $error {
                fn into_response(self) -> Response {
                    if matches!(self.code(), ErrorCode::InternalError) {
                        tracing::error!("Internal error: {}", self);
                    } else {
                        tracing::debug!("Rejected request: {}", self);
                    }
                    ApiError::from(self).into_response()
                }
            }
        )+
    };
}

impl_error_response!(
    ListIncomeError,
    RemoveIncomeError,
    EditIncomeError,
    CreateIncomeError,
);

// ===== Validation =====

fn validate_range(query: &ListIncomeQuery) -> Result<IncomeQueryRange, ListIncomeError> {
    let start = query
        .start
        .as_deref()
        .and_then(parse_int)
        .ok_or(ListIncomeError::RequireStart)?;
    let end = query
        .end
        .as_deref()
        .and_then(parse_int)
        .ok_or(ListIncomeError::RequireEnd)?;

    Ok(IncomeQueryRange { start, end })
}

fn validate_id(id: Option<String>) -> Option<IncomeId> {
    id.and_then(IncomeId::new)
}

fn validate_entry_fields(
    body: &IncomeRequest,
    now: i64,
) -> Result<IncomePatch, EntryFieldError> {
    let description =
        text_field(body.description.as_ref()).ok_or(EntryFieldError::RequireDescription)?;

    let seconds = body
        .timestamp
        .as_ref()
        .and_then(int_from_json)
        .ok_or(EntryFieldError::RequireTimestamp)?;
    let timestamp = Timestamp::new(seconds, now).ok_or(EntryFieldError::InvalidTimestamp)?;

    let category = text_field(body.category.as_ref()).ok_or(EntryFieldError::RequireCategory)?;

    Ok(IncomePatch {
        description,
        timestamp,
        category,
    })
}

fn validate_edit(
    id: Option<String>,
    body: &IncomeRequest,
    now: i64,
) -> Result<(IncomeId, IncomePatch), EditIncomeError> {
    let id = validate_id(id).ok_or(EditIncomeError::RequireId)?;
    let patch = validate_entry_fields(body, now)?;
    Ok((id, patch))
}

fn validate_create(body: &IncomeRequest, now: i64) -> Result<NewIncome, CreateIncomeError> {
    let amount = body.amount.as_ref().ok_or(CreateIncomeError::RequireAmount)?;
    let amount = decimal_from_json(amount)
        .and_then(|value| Amount::new(value).ok())
        .ok_or(CreateIncomeError::InvalidAmount)?;

    let IncomePatch {
        description,
        timestamp,
        category,
    } = validate_entry_fields(body, now)?;

    Ok(NewIncome {
        amount,
        description,
        timestamp,
        category,
    })
}

// ===== Handlers =====

/// List income within a time range
///
/// GET /api/income?start=<seconds>&end=<seconds>
///
/// Every record returned by the repository is passed through `to_model`;
/// the response is the mapped records in repository order.
pub fn list_income<M, T>(repo: Arc<dyn IncomeRepository>, to_model: M) -> MethodRouter
where
    M: Fn(Income) -> T + Clone + Send + Sync + 'static,
    T: Serialize + Send + 'static,
{
    get(move |query: Option<Query<Vec<(String, String)>>>| async move {
        let query = ListIncomeQuery::from_pairs(query.map(|Query(q)| q).unwrap_or_default());
        let range = validate_range(&query)?;

        let records = repo
            .get_income(range.start, range.end)
            .await
            .map_err(ListIncomeError::Repository)?;

        let models: Vec<T> = records.into_iter().map(to_model).collect();
        Ok::<_, ListIncomeError>(Json(models))
    })
}

/// Delete an income entry
///
/// DELETE /api/income/:id
///
/// Answers `{}` whether or not the id existed.
pub fn remove_income(repo: Arc<dyn IncomeRepository>) -> MethodRouter {
    delete(move |path: Option<Path<String>>| async move {
        let id = validate_id(path.map(|Path(id)| id)).ok_or(RemoveIncomeError::RequireId)?;

        repo.remove_income(&id)
            .await
            .map_err(RemoveIncomeError::Repository)?;

        Ok::<_, RemoveIncomeError>(Json(json!({})))
    })
}

/// Edit description, timestamp and category of an income entry
///
/// PATCH /api/income/:id
pub fn edit_income(repo: Arc<dyn IncomeRepository>) -> MethodRouter {
    edit_income_with_clock(repo, Utc::now)
}

/// Same as [`edit_income`] with an explicit clock for the timestamp check
pub fn edit_income_with_clock<C>(repo: Arc<dyn IncomeRepository>, clock: C) -> MethodRouter
where
    C: Fn() -> DateTime<Utc> + Clone + Send + Sync + 'static,
{
    patch(
        move |path: Option<Path<String>>, body: Option<Json<IncomeRequest>>| async move {
            let body = body.map(|Json(b)| b).unwrap_or_default();
            let (id, patch) =
                validate_edit(path.map(|Path(id)| id), &body, clock().timestamp())?;

            repo.edit_income(&id, patch)
                .await
                .map_err(EditIncomeError::Repository)?;

            Ok::<_, EditIncomeError>(Json(json!({})))
        },
    )
}

/// Create an income entry
///
/// POST /api/income
pub fn create_income(repo: Arc<dyn IncomeRepository>) -> MethodRouter {
    create_income_with_clock(repo, Utc::now)
}

/// Same as [`create_income`] with an explicit clock for the timestamp check
pub fn create_income_with_clock<C>(repo: Arc<dyn IncomeRepository>, clock: C) -> MethodRouter
where
    C: Fn() -> DateTime<Utc> + Clone + Send + Sync + 'static,
{
    post(move |body: Option<Json<IncomeRequest>>| async move {
        let body = body.map(|Json(b)| b).unwrap_or_default();
        let income = validate_create(&body, clock().timestamp())?;

        let id = repo
            .create_income(income)
            .await
            .map_err(CreateIncomeError::Repository)?;

        tracing::info!(income_id = %id, "Income created");

        Ok::<_, CreateIncomeError>((StatusCode::CREATED, Json(CreateIncomeResponse { id })))
    })
}

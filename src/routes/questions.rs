/*!
 * Question routes for the forum, mounted under `/questions`.
 *
 * Listing, thread view and mutations require an authenticated session;
 * search is public.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use serde_json::{json, Value};

use crate::{
    auth::{middleware::require_auth, Claims},
    models::{CreateQuestionRequest, CreateQuestionResponse, SearchParams, UpdateQuestionRequest},
    routes::views::{self, Rendered},
    services::SearchOutcome,
    AppError, AppState, Result,
};

pub fn routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/:id", get(get_question).patch(update_question).delete(delete_question))
        .route_layer(middleware::from_fn(require_auth));

    let public_routes = Router::new()
        .route("/search", get(search_questions));

    protected_routes.merge(public_routes)
}

/// GET /questions
async fn list_questions(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let page = app_state.question_service.list_questions(claims.sub).await?;
    Ok(Rendered::new(views::HOME, page).into_response())
}

/// GET /questions/{id}
async fn get_question(
    path: std::result::Result<Path<i64>, PathRejection>,
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let Path(id) = path?;
    tracing::debug!("Getting question {} for user {}", id, claims.sub);

    let detail = app_state.question_service.get_question_detail(id, claims.sub).await?;
    Ok(Rendered::new(views::QUESTION, detail).into_response())
}

/// GET /questions/search?q=text
async fn search_questions(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response> {
    let term = params.q
        .ok_or_else(|| AppError::ValidationError("Missing search query parameter 'q'".to_string()))?;

    let response = match app_state.question_service.search_questions(&term).await? {
        SearchOutcome::Found(page) => Rendered::new(views::HOME, page).into_response(),
        SearchOutcome::NotFound(not_found) => Rendered::new(views::SEARCH_NOT_FOUND, not_found).into_response(),
    };
    Ok(response)
}

/// POST /questions
/// Body: { "question": "..." }
async fn create_question(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    request: std::result::Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreateQuestionResponse>> {
    let Json(request) = request?;
    let question = app_state.question_service
        .create_question(claims.sub, &request.question)
        .await?;

    Ok(Json(CreateQuestionResponse {
        author: claims.username,
        question,
    }))
}

/// PATCH /questions/{id}
/// Body: { "newQue": "..." }
async fn update_question(
    path: std::result::Result<Path<i64>, PathRejection>,
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    request: std::result::Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    let Json(request) = request?;
    tracing::debug!("Updating question {} by user {}", id, claims.sub);

    app_state.question_service.update_question(id, &request.new_que).await?;
    Ok(Json(json!({})))
}

/// DELETE /questions/{id}
async fn delete_question(
    path: std::result::Result<Path<i64>, PathRejection>,
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    tracing::debug!("Deleting question {} by user {}", id, claims.sub);

    app_state.question_service.delete_question(id).await?;
    Ok(Json(json!({})))
}

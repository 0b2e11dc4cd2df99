// Hand-off to the template layer
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const HOME: &str = "home";
pub const QUESTION: &str = "que";
pub const SEARCH_NOT_FOUND: &str = "search-not-found";

/// A template name plus the context it is rendered with.
/// Serialized as `{"template": ..., "context": ...}`.
#[derive(Debug, Serialize)]
pub struct Rendered<T: Serialize> {
    pub template: &'static str,
    pub context: T,
}

impl<T: Serialize> Rendered<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Self { template, context }
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

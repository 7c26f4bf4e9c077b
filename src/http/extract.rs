use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` whose rejection is reported as `{"error": "Invalid request"}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body of a listing request (`NewProperty` or `PropertyUpdate`).
///
/// A body with a missing required listing field, a `type` or `status`
/// outside the closed sets, or a non-numeric amount is answered with
/// `400 VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ListingBody<T>(pub T);

//! Extractor plumbing shared by the handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use wayfinder_lib::Error as LibError;
use wayfinder_service_shared::{
    from_lib_error, ProblemDetails, RequestId, ServiceResponse, Validate,
};

pub(crate) type ApiResult<T> = Result<ServiceResponse<T>, ProblemDetails>;

/// Unwrap a JSON body, turning malformed input into a 400.
pub(crate) fn body<T>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
) -> Result<T, ProblemDetails> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
    })
}

/// Unwrap a JSON body and run its [`Validate`] impl.
pub(crate) fn validated<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
) -> Result<T::Output, ProblemDetails> {
    body(payload, request_id)?
        .validate(request_id.as_str())
        .map_err(|problem| *problem)
}

pub(crate) fn path<T>(
    param: Result<Path<T>, PathRejection>,
    request_id: &RequestId,
) -> Result<T, ProblemDetails> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| {
            ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
        })
}

pub(crate) fn problem(error: &LibError, request_id: &RequestId) -> ProblemDetails {
    from_lib_error(error, request_id.as_str())
}

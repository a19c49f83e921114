use crate::api::APIResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error;

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod hub;
pub mod model;
pub mod recorder;
pub mod routes;
pub mod sp_http;
pub mod verifier;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{PageContext, RecorderContext, RecorderProperties};
pub use error::RecorderError;
pub use model::Outcome;
pub use recorder::on_init;
pub use sp_http::{SpHttp, SpRestClient};

pub fn bad_request(body: APIResponse) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

pub fn bad_gateway(body: APIResponse) -> Response {
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

pub fn good_response(body: APIResponse) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use tracing::info;

use crate::api::{APIResponse, PageLoadRequest};
use crate::context::{PageContext, RecorderContext, RecorderProperties};
use crate::recorder::on_init;
use crate::sp_http::SpRestClient;
use crate::{bad_gateway, bad_request, good_response, unpack_error};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub properties: RecorderProperties,
    /// Only pages on this origin are accepted when set.
    pub tenant_origin: Option<String>,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(APIResponse::new_from_msg("ok"))
}

pub async fn page_load(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PageLoadRequest>,
) -> Response {
    let page = match PageContext::new(&req.web_absolute_url, &req.page_url) {
        Ok(page) => page,
        Err(e) => {
            tracing::info!("rejected page load. error: {}", e);
            return bad_request(APIResponse::new_from_msg(&e.to_string()));
        }
    };

    if let Some(tenant) = &state.tenant_origin {
        if page.origin() != *tenant {
            tracing::info!(page = %req.page_url, "rejected page load from another tenant");
            return bad_request(APIResponse::new_from_msg("page is not on the configured tenant"));
        }
    }

    // Only the caller's own session is ever forwarded.
    let http = SpRestClient::new(state.client.clone(), bearer_token(&headers));
    let ctx = RecorderContext::new(http, page, state.properties.clone());

    match on_init(&ctx).await {
        Ok(outcome) => good_response(APIResponse::new_from_outcome(outcome)),
        Err(e) => {
            let msg = unpack_error(&e);
            tracing::error!(error = %msg, page = %req.page_url, "page load hook failed");
            bad_gateway(APIResponse::new_from_msg(&msg))
        }
    }
}

// Common test utilities: an in-process stand-in for the host's REST API.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

pub const LIST_ID: &str = "5a3e4e1c-0000-4000-8000-000000000001";
pub const TOKEN: &str = "t0k";

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub path: String,
    pub accept: Option<String>,
    pub body: Value,
}

/// What the page-properties endpoint answers with.
#[derive(Debug, Clone)]
pub enum PageReply {
    Json(Value),
    Html(&'static str),
}

struct Inner {
    base_url: String,
    page: PageReply,
    hub_status: StatusCode,
    posts: Mutex<Vec<RecordedPost>>,
    authorizations: Mutex<Vec<Option<String>>>,
}

#[derive(Clone)]
pub struct FakeSharePoint {
    inner: Arc<Inner>,
}

impl FakeSharePoint {
    /// Serve a fake tenant on a random local port.
    pub async fn spawn(page: Value, hub_status: StatusCode) -> Self {
        Self::spawn_with(PageReply::Json(page), hub_status).await
    }

    pub async fn spawn_with(page: PageReply, hub_status: StatusCode) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let host = FakeSharePoint {
            inner: Arc::new(Inner {
                base_url,
                page,
                hub_status,
                posts: Mutex::new(Vec::new()),
                authorizations: Mutex::new(Vec::new()),
            }),
        };

        let app = Router::new().fallback(sharepoint).with_state(host.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        host
    }

    pub fn web_url(&self) -> String {
        format!("{}/sites/learn", self.inner.base_url)
    }

    pub fn page_url(&self) -> String {
        format!("{}/sites/learn/SitePages/Intro.aspx", self.inner.base_url)
    }

    pub fn hub_url(&self) -> String {
        format!("{}/sites/hub", self.inner.base_url)
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.inner.posts.lock().unwrap().clone()
    }

    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.inner.authorizations.lock().unwrap().clone()
    }
}

async fn sharepoint(
    State(host): State<FakeSharePoint>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let inner = &host.inner;
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    inner.authorizations.lock().unwrap().push(auth);

    let path = uri.path();
    let items_path = format!("/sites/hub/_api/web/lists(guid'{LIST_ID}')/items");

    let is_get = method == Method::GET;

    if is_get
        && path.starts_with("/sites/learn/_api/web/GetFileByServerRelativeUrl('/sites/learn/SitePages/Intro.aspx')")
        && path.ends_with("/ListItemAllFields")
    {
        return match &inner.page {
            PageReply::Json(page) => Json(page.clone()).into_response(),
            PageReply::Html(html) => ([(header::CONTENT_TYPE, "text/html")], *html).into_response(),
        };
    }

    if is_get && path == "/sites/learn/_api/web/HubSiteData" {
        if !inner.hub_status.is_success() {
            return (inner.hub_status, "hub lookup failed").into_response();
        }
        let value = json!({ "url": host.hub_url(), "name": "Learning Hub" }).to_string();
        return Json(json!({ "value": value })).into_response();
    }

    if is_get && path == "/sites/hub/_api/lists/GetByTitle('Learning%20Records')" {
        return Json(json!({
            "Id": LIST_ID,
            "ListItemEntityTypeFullName": "SP.Data.LearningRecordsListItem"
        }))
        .into_response();
    }

    if is_get && path == "/sites/hub/_api/web/currentUser" {
        return Json(json!({ "Id": 12 })).into_response();
    }

    if method == Method::POST && path == items_path {
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        inner.posts.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            accept,
            body,
        });
        return (StatusCode::CREATED, Json(json!({ "Id": 1 }))).into_response();
    }

    (StatusCode::NOT_FOUND, "not found").into_response()
}

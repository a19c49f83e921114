use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{RecorderError, Result};
use crate::sp_http::SpHttp;

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Canned host: answers by exact URL, anything unknown is a 404.
#[derive(Default)]
pub struct FakeHost {
    responses: HashMap<String, std::result::Result<Value, u16>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<SentRequest> {
        self.sent().into_iter().filter(|r| r.method == "POST").collect()
    }

    fn answer(&self, url: &str) -> Result<Value> {
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(RecorderError::Status {
                url: url.to_string(),
                status: *status,
                body: String::new(),
            }),
            None => Err(RecorderError::Status {
                url: url.to_string(),
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}

impl SpHttp for FakeHost {
    async fn get(&self, url: &str) -> Result<Value> {
        self.sent.lock().unwrap().push(SentRequest {
            method: "GET",
            url: url.to_string(),
            body: None,
            headers: vec![],
        });
        self.answer(url)
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&'static str, &'static str)],
    ) -> Result<Value> {
        self.sent.lock().unwrap().push(SentRequest {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
            headers: headers.to_vec(),
        });
        self.answer(url)
    }
}

pub const WEB: &str = "https://contoso.example/sites/learn";
pub const PAGE: &str = "https://contoso.example/sites/learn/SitePages/Intro.aspx";
pub const HUB: &str = "https://contoso.example/sites/hub";
pub const LIST_ID: &str = "5a3e4e1c-0000-4000-8000-000000000001";

pub fn page_url() -> String {
    format!(
        "{WEB}/_api/web/GetFileByServerRelativeUrl('/sites/learn/SitePages/Intro.aspx')/ListItemAllFields?$select=Title,IsLearningPage"
    )
}

pub fn hub_data_url() -> String {
    format!("{WEB}/_api/web/HubSiteData")
}

pub fn list_url() -> String {
    format!("{HUB}/_api/lists/GetByTitle('Learning%20Records')")
}

pub fn user_url() -> String {
    format!("{HUB}/_api/web/currentUser?$select=Id")
}

pub fn items_url() -> String {
    format!("{HUB}/_api/web/lists(guid'{LIST_ID}')/items")
}

/// A host where the hub, list and user all resolve.
pub fn hub_host() -> FakeHost {
    FakeHost::new()
        .respond(
            &hub_data_url(),
            serde_json::json!({ "value": format!("{{\"url\":\"{HUB}\",\"name\":\"Hub\"}}") }),
        )
        .respond(
            &list_url(),
            serde_json::json!({ "Id": LIST_ID, "ListItemEntityTypeFullName": "SP.Data.LearningRecordsListItem" }),
        )
        .respond(&user_url(), serde_json::json!({ "Id": 12 }))
        .respond(&items_url(), serde_json::json!({ "Id": 1 }))
}

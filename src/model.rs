use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Classification of the current page. `title` is set only for learning pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVerification {
    pub title: Option<String>,
    pub is_learning_page: bool,
}

impl PageVerification {
    pub fn learning_page(title: String) -> Self {
        Self {
            title: Some(title),
            is_learning_page: true,
        }
    }

    pub fn not_learning_page() -> Self {
        Self {
            title: None,
            is_learning_page: false,
        }
    }
}

/// Fields of the page's backing list item, as returned by `ListItemAllFields`.
/// Kept as the raw object so any field, `Title` included, can serve as the flag.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct PageProperties {
    fields: Map<String, Value>,
}

impl PageProperties {
    pub fn title(&self) -> Option<String> {
        self.fields.get("Title").and_then(Value::as_str).map(str::to_owned)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// `HubSiteData` envelope; `value` is itself a JSON document.
#[derive(Debug, Deserialize)]
pub struct HubSiteData {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HubSite {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListInfo {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ListItemEntityTypeFullName")]
    pub list_item_entity_type_full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "Id")]
    pub id: i64,
}

/// Where and as whom a learning record gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubListInfo {
    pub api_url: String,
    pub item_entity_type_full_name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Url")]
    pub url: String,
}

/// Body of the list item created on the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "URL")]
    pub url: RecordLink,
}

impl LearningRecord {
    pub fn new(title: &str, user_id: i64, page_address: &str) -> Self {
        Self {
            title: title.to_owned(),
            user_id,
            url: RecordLink {
                description: title.to_owned(),
                url: page_address.to_owned(),
            },
        }
    }

    /// JSON body for the create-item request.
    pub fn to_json(&self) -> Value {
        json!({
            "Title": self.title,
            "UserId": self.user_id,
            "URL": {
                "Description": self.url.description,
                "Url": self.url.url,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NotLearningPage,
    RecordAdded,
}

/// JavaScript truthiness, which is how the host scripts read list flags.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

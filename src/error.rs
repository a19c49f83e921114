use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecorderError>;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("failed to parse {what}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("site is not associated with a hub site")]
    NoHubSite,

    #[error("learning page has no Title")]
    MissingTitle,

    #[error("invalid page url: {0}")]
    InvalidPageUrl(String),

    #[error("hub site {0} is not on the page's origin")]
    ForeignHub(String),

    #[error("invalid request header {0}")]
    InvalidHeader(String),
}

impl RecorderError {
    pub fn parse(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| RecorderError::Parse { what, source }
    }
}

use reqwest::Url;
use serde::Deserialize;

use crate::error::{RecorderError, Result};
use crate::sp_http::SpHttp;

/// Per-deployment options of the recorder.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RecorderProperties {
    pub record_list_title: String,
    pub verification_property_name: String,
}

/// The site and page a hook invocation runs for.
#[derive(Debug, Clone)]
pub struct PageContext {
    web_absolute_url: String,
    page: Url,
}

impl PageContext {
    pub fn new(web_absolute_url: &str, page_url: &str) -> Result<Self> {
        let page = parse_http_url(page_url)?;
        let web = parse_http_url(web_absolute_url)?;

        if web.origin() != page.origin() {
            return Err(RecorderError::InvalidPageUrl(format!(
                "{page_url} is not on the origin of {web_absolute_url}"
            )));
        }

        let web_path = web.path().trim_end_matches('/');
        let under_web = page.path() == web_path || page.path().starts_with(&format!("{web_path}/"));
        if !under_web {
            return Err(RecorderError::InvalidPageUrl(format!(
                "{page_url} is not under {web_absolute_url}"
            )));
        }

        Ok(Self {
            web_absolute_url: format!("{}{}", web.origin().ascii_serialization(), web_path),
            page,
        })
    }

    /// Scheme, host and port of the page, e.g. `https://contoso.example`.
    pub fn origin(&self) -> String {
        self.page.origin().ascii_serialization()
    }

    pub fn web_absolute_url(&self) -> &str {
        &self.web_absolute_url
    }

    /// Server-relative path of the page, e.g. `/sites/a/SitePages/Intro.aspx`.
    pub fn server_relative_path(&self) -> &str {
        self.page.path()
    }

    /// Origin plus path, without query or fragment.
    pub fn page_address(&self) -> String {
        format!("{}{}", self.origin(), self.page.path())
    }
}

/// Everything one initialization needs: a client, the page, and the options.
pub struct RecorderContext<C> {
    pub http: C,
    pub page: PageContext,
    pub properties: RecorderProperties,
}

impl<C: SpHttp> RecorderContext<C> {
    pub fn new(http: C, page: PageContext, properties: RecorderProperties) -> Self {
        Self {
            http,
            page,
            properties,
        }
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| RecorderError::InvalidPageUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RecorderError::InvalidPageUrl(raw.to_string()));
    }
    Ok(url)
}

/// Origin of an absolute http(s) URL.
pub fn url_origin(raw: &str) -> Result<String> {
    Ok(parse_http_url(raw)?.origin().ascii_serialization())
}

/// Field internal names: a letter or `_`, then letters, digits or `_`.
pub fn is_odata_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote a value as an OData string literal body by doubling single quotes.
pub fn odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}

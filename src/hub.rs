//! Hub list resolution.
//!
//! Learning records live in a list on the hub site the current site belongs to.
//! Nothing is cached: every page load walks the full discovery chain.

use futures_util::future::try_join;

use crate::context::{RecorderContext, odata_literal, url_origin};
use crate::error::{RecorderError, Result};
use crate::model::{CurrentUser, HubListInfo, HubSite, HubSiteData, ListInfo};
use crate::sp_http::{SpHttp, decode};

/// Parse the `HubSiteData` envelope and return the hub's base URL.
pub fn parse_hub_site(data: HubSiteData) -> Result<String> {
    let value = data.value.ok_or(RecorderError::NoHubSite)?;
    let hub: HubSite = serde_json::from_str(&value).map_err(RecorderError::parse("hub site data"))?;
    if hub.url.is_empty() {
        return Err(RecorderError::NoHubSite);
    }
    Ok(hub.url.trim_end_matches('/').to_string())
}

pub async fn hub_site_url<C: SpHttp>(ctx: &RecorderContext<C>) -> Result<String> {
    let url = format!("{}/_api/web/HubSiteData", ctx.page.web_absolute_url());
    let body = ctx.http.get(&url).await?;
    parse_hub_site(decode(body, "hub site envelope")?)
}

pub fn list_by_title_url(hub_url: &str, title: &str) -> String {
    format!(
        "{}/_api/lists/GetByTitle('{}')",
        hub_url,
        urlencoding::encode(&odata_literal(title))
    )
}

pub fn list_api_url(hub_url: &str, list_id: &str) -> String {
    format!("{}/_api/web/lists(guid'{}')", hub_url, list_id)
}

/// Find the record list on the hub and the current user's id there.
pub async fn resolve_hub_list<C: SpHttp>(ctx: &RecorderContext<C>) -> Result<HubListInfo> {
    let hub_url = hub_site_url(ctx).await?;
    // The session credential must not leave the tenant the page lives on.
    let same_origin = url_origin(&hub_url).is_ok_and(|origin| origin == ctx.page.origin());
    if !same_origin {
        return Err(RecorderError::ForeignHub(hub_url));
    }
    tracing::debug!(hub = %hub_url, "resolved hub site");

    let list_url = list_by_title_url(&hub_url, &ctx.properties.record_list_title);
    let user_url = format!("{}/_api/web/currentUser?$select=Id", hub_url);

    let (list, user) = try_join(ctx.http.get(&list_url), ctx.http.get(&user_url)).await?;
    let list: ListInfo = decode(list, "record list")?;
    let user: CurrentUser = decode(user, "current user")?;

    Ok(HubListInfo {
        api_url: list_api_url(&hub_url, &list.id),
        item_entity_type_full_name: list.list_item_entity_type_full_name,
        user_id: user.id,
    })
}

use crate::context::{RecorderContext, odata_literal};
use crate::error::{RecorderError, Result};
use crate::model::{PageProperties, PageVerification, is_truthy};
use crate::sp_http::{SpHttp, decode};

pub fn page_properties_url<C>(ctx: &RecorderContext<C>) -> String {
    let flag = &ctx.properties.verification_property_name;
    let select = if flag == "Title" {
        "Title".to_string()
    } else {
        format!("Title,{flag}")
    };

    format!(
        "{}/_api/web/GetFileByServerRelativeUrl('{}')/ListItemAllFields?$select={}",
        ctx.page.web_absolute_url(),
        odata_literal(ctx.page.server_relative_path()),
        select,
    )
}

/// Read the page's list item and decide whether it is flagged as a learning page.
pub async fn verify_page<C: SpHttp>(ctx: &RecorderContext<C>) -> Result<PageVerification> {
    let body = ctx.http.get(&page_properties_url(ctx)).await?;
    let properties: PageProperties = decode(body, "page properties")?;

    let flag = &ctx.properties.verification_property_name;
    let flagged = properties.field(flag).is_some_and(is_truthy);
    tracing::debug!(flag = %flag, flagged, "verified page");

    if !flagged {
        return Ok(PageVerification::not_learning_page());
    }

    let title = properties.title().ok_or(RecorderError::MissingTitle)?;
    Ok(PageVerification::learning_page(title))
}

use crate::context::RecorderContext;
use crate::error::Result;
use crate::hub::resolve_hub_list;
use crate::model::LearningRecord;
use crate::sp_http::SpHttp;

const ACCEPT_JSON: (&str, &str) = ("accept", "application/json");

/// Create one learning record on the hub list for the current user and page.
pub async fn add_learning_record<C: SpHttp>(ctx: &RecorderContext<C>, title: &str) -> Result<()> {
    let list = resolve_hub_list(ctx).await?;
    let record = LearningRecord::new(title, list.user_id, &ctx.page.page_address());
    let body = record.to_json();

    let created = ctx
        .http
        .post(&format!("{}/items", list.api_url), &body, &[ACCEPT_JSON])
        .await?;

    tracing::debug!(
        item_id = ?created.get("Id"),
        entity_type = %list.item_entity_type_full_name,
        "created learning record"
    );
    Ok(())
}

use crate::context::RecorderContext;
use crate::error::Result;
use crate::model::Outcome;
use crate::sp_http::SpHttp;
use crate::verifier::verify_page;
use crate::writer::add_learning_record;

/// Page-load hook: verify the page, then record it if it is a learning page.
///
/// Any failure stops the sequence and is returned as is; nothing is retried
/// and a page visited twice is recorded twice.
pub async fn on_init<C: SpHttp>(ctx: &RecorderContext<C>) -> Result<Outcome> {
    let page = ctx.page.page_address();
    tracing::info!(page = %page, "initialized learning recorder");

    let verification = verify_page(ctx).await?;
    match verification.title {
        Some(title) if verification.is_learning_page => {
            tracing::info!(page = %page, title = %title, "this is a learning page");
            add_learning_record(ctx, &title).await?;
            tracing::info!(page = %page, "learning record is added");
            Ok(Outcome::RecordAdded)
        }
        _ => {
            tracing::info!(page = %page, "this is not a learning page");
            Ok(Outcome::NotLearningPage)
        }
    }
}

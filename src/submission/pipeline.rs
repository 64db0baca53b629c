use crate::error::AppError;
use crate::models::Submission;
use crate::reply::Reply;
use crate::state::SharedState;

use super::parser::FormData;
use super::validate;

pub async fn run(state: &SharedState, form: FormData) -> Result<Reply, AppError> {
    let entry = match validate::validate(&form) {
        Ok(entry) => entry,
        Err(prompt) => {
            tracing::debug!("Rejected submission: {prompt}");
            return Ok(Reply::bad_request(prompt));
        }
    };

    let submission = Submission::new(
        entry.name,
        entry.msg,
        state.clock.now(),
        &state.config.utc_offset,
    );
    let value = serde_json::to_string(&submission)?;

    // Ids come from the millisecond clock with no uniqueness check; a second
    // write in the same millisecond replaces the first.
    state.store.put(&submission.id, value).await?;

    tracing::info!(
        id = %submission.id,
        store = state.store.name(),
        "Stored submission"
    );

    Ok(Reply::ok(&submission.name))
}

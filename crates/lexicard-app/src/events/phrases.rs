use lexicard_core::phrases::{system_prompt, user_prompt};
use lexicard_types::{AppEvent, PhraseRequest};

use crate::context::AppContext;

pub async fn handle_phrase_generation(ctx: &AppContext, request: PhraseRequest) -> AppEvent {
    let system = system_prompt(ctx.config.completion.phrase_count, &request);
    let user = user_prompt(&request);
    tracing::debug!(
        "Generating phrases for {:?} with {}",
        request.word,
        ctx.completion.metadata()
    );

    let result = ctx
        .completion
        .complete(&system, &user)
        .await
        .map_err(|e| e.to_string());
    AppEvent::PhrasesFinished(result)
}

use std::io::Write;

use kanal::{AsyncReceiver, AsyncSender};
use lexicard_core::{Session, Transition};
use lexicard_types::{AppEvent, Output, Request};
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::render::Renderer;
use crate::spinner::Spinner;

pub mod create_cards;
pub mod editor;
pub mod listing;
pub mod lookup;
pub mod phrases;

use create_cards::handle_card_creation;
use editor::edit_text;
use listing::{handle_list_decks, handle_list_dictionaries, handle_list_templates};
use lookup::handle_lookup;
use phrases::handle_phrase_generation;

/// App's main loop: the only owner of session state
pub async fn event_loop(
    ctx: AppContext,
    event_rx: AsyncReceiver<AppEvent>,
    resume_tx: AsyncSender<()>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = Session::new();
    let mut spinner = Spinner::new(ctx.config.ui.spinner_tick_ms);
    let renderer = Renderer::for_stdout();

    let pair = ctx.dictionary.pair();
    let welcome = Output::Notice(format!(
        "{} → {} ({}). Type a word to look it up, /help for commands.",
        pair.from_label,
        pair.to_label,
        pair.code()
    ));
    println!("{}", renderer.render(&welcome));
    prompt(&session, &renderer);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = event_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        let from_input = matches!(event, AppEvent::Input(_));
        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));

        let transition = session.handle(event);
        drive(&ctx, &mut session, &mut spinner, &renderer, transition).await;

        if !session.is_busy() {
            prompt(&session, &renderer);
        }
        if from_input && resume_tx.send(()).await.is_err() {
            break;
        }
    }

    spinner.stop();
    tracing::info!("Event loop stopping");
    Ok(())
}

/// Render a transition and run its request; the editor is awaited in place
async fn drive(
    ctx: &AppContext,
    session: &mut Session,
    spinner: &mut Spinner,
    renderer: &Renderer,
    mut transition: Transition,
) {
    loop {
        if !transition.output.is_empty() || !session.is_busy() {
            spinner.stop();
        }
        for output in &transition.output {
            println!("{}", renderer.render(output));
        }

        match transition.request.take() {
            None => return,
            Some(Request::OpenEditor(text)) => {
                spinner.stop();
                let result = edit_text(ctx.config.ui.editor_command(), text).await;
                transition = session.handle(AppEvent::EditorFinished(result));
            }
            Some(request) => {
                spinner.start(request.busy_label());
                dispatch(ctx, request);
                return;
            }
        }
    }
}

fn prompt(session: &Session, renderer: &Renderer) {
    println!("{}", renderer.hints(&session.hints()));
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Run `request` on its own task; the result comes back as an event
pub fn dispatch(ctx: &AppContext, request: Request) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let event = match request {
            Request::Lookup(word) => handle_lookup(&ctx, word).await,
            Request::GeneratePhrases(request) => handle_phrase_generation(&ctx, request).await,
            Request::CreateCards(records) => handle_card_creation(&ctx, records).await,
            Request::ListDecks => handle_list_decks(&ctx).await,
            Request::ListTemplates => handle_list_templates(&ctx).await,
            Request::ListDictionaries(filter) => handle_list_dictionaries(&ctx, filter).await,
            Request::OpenEditor(_) => {
                tracing::error!("Editor requests are run by the event loop, not dispatched");
                AppEvent::EditorFinished(Err("editor cannot run in the background".to_string()))
            }
        };

        if let Err(e) = ctx.event_tx.send(event).await {
            tracing::error!("Failed to deliver request result: {e}");
        }
    });
}

//! Terminal driver for the interactive view.

use crate::client::EngineClient;
use crate::clipboard::ClipboardSink;
use crate::error::UnfoldError;
use crate::view::{Effect, Msg, View, ViewState, render};
use serde_json::Value;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the seed with this text and submit it.
    Submit(String),
    Copy,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        ":copy" => Command::Copy,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Submit(line.to_string()),
    }
}

/// Runs the view until `:quit` or end of input, returning the final state.
///
/// When input ends while a request is outstanding, the response is still
/// awaited and applied before returning.
pub async fn run<R, C>(
    input: R,
    client: EngineClient,
    clipboard: &mut C,
) -> io::Result<ViewState>
where
    R: AsyncBufRead + Unpin,
    C: ClipboardSink,
{
    let mut view = View::new();
    view.subscribe(|state| {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", render(state));
        let _ = stdout.flush();
    });
    print!("{}", render(view.state()));

    let (tx, mut rx) = mpsc::channel::<Result<Value, UnfoldError>>(1);
    let mut lines = input.lines();
    let mut input_closed = false;

    loop {
        if input_closed && !view.state().is_loading() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line? else {
                    input_closed = true;
                    continue;
                };
                let effects = match parse_command(&line) {
                    Command::Quit => break,
                    Command::Copy => view.dispatch(Msg::CopyClicked),
                    Command::Submit(seed) => {
                        view.dispatch(Msg::SeedEdited(seed));
                        let effects = view.dispatch(Msg::SubmitClicked);
                        if effects.is_empty() && view.state().is_loading() {
                            println!("(still metamorphosing, wait for the current request)");
                        }
                        effects
                    }
                };
                for effect in effects {
                    run_effect(effect, &client, &tx, clipboard);
                }
            }
            Some(outcome) = rx.recv() => {
                view.dispatch(Msg::ResponseArrived(outcome));
            }
        }
    }

    view.dispatch(Msg::Unmounted);
    Ok(view.state().clone())
}

fn run_effect<C: ClipboardSink>(
    effect: Effect,
    client: &EngineClient,
    tx: &mpsc::Sender<Result<Value, UnfoldError>>,
    clipboard: &mut C,
) {
    match effect {
        Effect::SendRequest(payload) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client.unfold(&payload).await;
                if tx.send(outcome).await.is_err() {
                    log::debug!("View closed before the response arrived");
                }
            });
        }
        Effect::CopyToClipboard(text) => match clipboard.set_text(&text) {
            Ok(()) => println!("Copied {} bytes of JSON to the clipboard.", text.len()),
            Err(err) => {
                log::warn!("Copy failed: {err}");
                println!("{err}");
            }
        },
    }
}

use std::sync::Arc;

use chat_widget::config::{ConfigError, WidgetConfig, WidgetCopy, parse_endpoint};
use chat_widget::render::{Renderer, prompt_line};
use chat_widget::session::{SessionController, SessionState};
use chat_widget::transport::{HttpTransport, TransportError};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chat-widget", about = "Terminal front end for the assistant chat widget")]
struct Cli {
    /// Assistant endpoint; overrides `CHAT_ENDPOINT`.
    #[arg(long)]
    endpoint: Option<String>,

    /// Start with the panel open.
    #[arg(long, env = "CHAT_OPEN")]
    open: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Toggle,
    Open,
    Close,
    Quit,
    Say(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "/toggle" => Input::Toggle,
        "/open" => Input::Open,
        "/close" => Input::Close,
        "/quit" | "/exit" => Input::Quit,
        _ => Input::Say(line),
    }
}

/// Why a typed line can't become a message right now, if it can't.
///
/// The draft is left alone in both cases so a line typed while hidden or
/// waiting never overwrites anything.
fn say_notice(copy: &WidgetCopy, state: &SessionState) -> Option<String> {
    if !state.panel_open() {
        return Some("(/toggle to open the chat)".to_string());
    }
    if state.pending() {
        return Some(prompt_line(copy, state));
    }
    None
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = WidgetConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint.as_deref() {
        config.endpoint = parse_endpoint(Some(endpoint))?;
    }

    let transport = HttpTransport::new(config.endpoint.clone(), config.timeouts)?;
    tracing::info!(endpoint = %config.endpoint, "chat widget mounted");
    let session = SessionController::new(Arc::new(transport), config.copy);

    let mut rx = session.subscribe();
    let mut renderer = Renderer::new();
    if cli.open {
        session.toggle_panel();
    } else {
        println!("(/toggle to open the chat, /quit to leave)");
    }
    draw(&mut renderer, &session, &mut rx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Toggle => session.toggle_panel(),
                    Input::Open if !session.is_panel_open() => session.toggle_panel(),
                    Input::Close if session.is_panel_open() => session.toggle_panel(),
                    Input::Open | Input::Close => {}
                    Input::Quit => break,
                    Input::Say(text) => {
                        if let Some(notice) = say_notice(session.copy(), &session.snapshot()) {
                            println!("{notice}");
                        } else {
                            session.update_draft(text);
                            if let Ok(delivery) = session.start_submit() {
                                tokio::spawn(delivery);
                            }
                        }
                    }
                }
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&mut renderer, &session, &mut rx);
            }
        }
    }

    Ok(())
}

fn draw(renderer: &mut Renderer, session: &SessionController, rx: &mut watch::Receiver<SessionState>) {
    let state = rx.borrow_and_update().clone();
    let lines = renderer.frame(session.copy(), &state);
    if lines.is_empty() {
        return;
    }
    for line in &lines {
        println!("{line}");
    }
    if state.panel_open() {
        println!("{}", prompt_line(session.copy(), &state));
    }
}

//! A terminal chat with the coach bot.

#[macro_use]
extern crate tracing;

use std::io::Write as _;

use coach_chat::http::HttpChatService;
use coach_chat::service::ChatService;
use coach_chat::terminal::TerminalSurface;
use coach_chat::widget::{
    ChatWidget, ChatWidgetBuilder, KeyPress, TranscriptSurface, WidgetEvent,
};
use coach_chat::{ClientConfig, Command};
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let service = HttpChatService::new(config.service_config());
    debug!("using chat service at {}", service.config().base_url());

    let widget = ChatWidgetBuilder::with_service(service)
        .with_chat_options(config.chat_options)
        .build(TerminalSurface::stdout());
    let health = widget.initialize();
    let session = run_session(&widget);
    tokio::pin!(health, session);

    // The health banner may arrive while the prompt is already up. Leaving
    // the session drops a probe that has not settled yet.
    tokio::select! {
        () = &mut session => return,
        () = &mut health => {}
    }
    session.await;
}

async fn run_session<S, V>(widget: &ChatWidget<S, V>)
where
    S: ChatService,
    V: TranscriptSurface,
{
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut lines).await else {
            break;
        };
        match Command::parse(line.trim()) {
            Some(Command::Quit) => break,
            Some(Command::Reload) => widget.reload_knowledge_base().await,
            Some(Command::Models) => widget.show_models().await,
            None => {
                // The terminal already consumed the newline, so the
                // propagation result has nothing left to suppress.
                widget.set_input(line);
                widget
                    .handle_event(WidgetEvent::KeyPressed(KeyPress::enter()))
                    .await;
            }
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

//! Interactive dashboard loop. One command is handled to completion before
//! the next prompt appears. Startup cards keep arriving while the prompt
//! waits for input.

use inquire::{InquireError, Text};
use weatherdash_core::{Dashboard, Renderer, Replay};

use crate::terminal::TerminalRenderer;

const HELP: &str = "\
Commands:
  add <city>      track a new city (plain text also works)
  remove <city>   stop tracking a city
  toggle <city>   show or hide humidity and wind
  list            redraw all cards
  refresh         fetch fresh readings for every city
  help            this message
  quit            leave the dashboard";

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Add(String),
    Remove(String),
    Toggle(String),
    List,
    Refresh,
    Help,
    Quit,
    Empty,
    /// A known command without the argument it needs.
    Missing(&'static str),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let with_arg = |make: fn(String) -> Input, cmd: &'static str| {
        if rest.is_empty() { Input::Missing(cmd) } else { make(rest.to_string()) }
    };

    match head.to_lowercase().as_str() {
        "add" => with_arg(Input::Add, "add"),
        "remove" | "rm" => with_arg(Input::Remove, "remove"),
        "toggle" => with_arg(Input::Toggle, "toggle"),
        "list" | "ls" if rest.is_empty() => Input::List,
        "refresh" if rest.is_empty() => Input::Refresh,
        "help" | "?" if rest.is_empty() => Input::Help,
        "quit" | "exit" | "q" if rest.is_empty() => Input::Quit,
        _ => Input::Add(line.to_string()),
    }
}

pub async fn run(
    dash: &mut Dashboard<TerminalRenderer>,
    mut replay: Replay,
) -> anyhow::Result<()> {
    println!("Type a city name to add it, or `help` for commands.");

    loop {
        let line = match read_line(dash, &mut replay).await? {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Input::Add(city) => {
                // Failures were already shown to the user.
                let _ = dash.add_city(&city).await;
            }
            Input::Remove(city) => match dash.remove_city(&city).await {
                Ok(true) => {}
                Ok(false) => println!("'{city}' is not on the dashboard."),
                // Reported by the dashboard; the session carries on.
                Err(_) => {}
            },
            Input::Toggle(city) => {
                if dash.toggle_expanded(&city).is_none() {
                    println!("'{city}' is not on the dashboard.");
                }
            }
            Input::List => dash.renderer().redraw(),
            Input::Refresh => {
                dash.renderer_mut().clear();
                replay = dash.replay();
            }
            Input::Help => println!("{HELP}"),
            Input::Missing(cmd) => println!("Usage: {cmd} <city>"),
            Input::Empty => {}
            Input::Quit => break,
        }
    }

    Ok(())
}

/// Prompt on a blocking thread and render replayed cities until the user
/// submits a line.
async fn read_line(
    dash: &mut Dashboard<TerminalRenderer>,
    replay: &mut Replay,
) -> anyhow::Result<Result<String, InquireError>> {
    let prompt = tokio::task::spawn_blocking(|| Text::new("city>").prompt());
    tokio::pin!(prompt);

    loop {
        tokio::select! {
            answer = &mut prompt => return Ok(answer?),
            Some((city, result)) = replay.next_finished(), if !replay.is_empty() => {
                dash.show_replayed(&city, result);
            }
        }
    }
}

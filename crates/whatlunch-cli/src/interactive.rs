//! Line-oriented session over one recommendation flow.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use whatlunch_core::{AppConfig, Genre, Radius};

use crate::pick::build_flow;
use crate::render;
use crate::SearchArgs;

const HELP: &str = "\
commands:
  location <text>   where to search around (alias: l)
  genre <name>      korean, japanese, chinese, western, other, random (alias: g)
  radius <meters>   1-20000
  go                pick a restaurant
  again             pick a different one around the same place (alias: r)
  show              print the current state
  genres            list genres
  help
  quit
";

#[derive(Debug, PartialEq)]
pub(crate) enum Input {
    Location(String),
    Genre(Genre),
    Radius(Radius),
    Go,
    Again,
    Show,
    Genres,
    Help,
    Quit,
}

/// Parses one prompt line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, r)| (c, r.trim()));

    let input = match command.to_lowercase().as_str() {
        "location" | "l" => Input::Location(rest.to_string()),
        "genre" | "g" => Input::Genre(rest.parse().map_err(|e| format!("{e}"))?),
        "radius" => {
            let meters: u32 = rest
                .parse()
                .map_err(|_| format!("radius must be a whole number of meters, got {rest:?}"))?;
            if !(1..=20_000).contains(&meters) {
                return Err("radius must be between 1 and 20000 meters".to_string());
            }
            Input::Radius(Radius::from_meters(meters))
        }
        "go" | "pick" => Input::Go,
        "again" | "r" | "reroll" => Input::Again,
        "show" => Input::Show,
        "genres" => Input::Genres,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Some(input))
}

/// Runs the prompt loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdin/stdout fail.
/// Search failures are shown and the session continues.
pub(crate) async fn run_interactive(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let mut flow = build_flow(config, args)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{HELP}");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = match parse_input(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(message) => {
                println!("! {message}");
                continue;
            }
        };

        match input {
            Input::Location(text) => flow.edit_location(text),
            Input::Genre(genre) => flow.choose_genre(genre),
            Input::Radius(radius) => flow.set_radius(radius),
            Input::Go => {
                if let Err(e) = flow.submit().await {
                    tracing::debug!(error = %e, "submit failed");
                }
                print!("{}", render::view(&flow.view()));
            }
            Input::Again => {
                if let Err(e) = flow.reroll().await {
                    tracing::debug!(error = %e, "re-roll failed");
                    if matches!(e, whatlunch_search::FlowError::NotReady) {
                        println!("! {e}");
                    }
                }
                print!("{}", render::view(&flow.view()));
            }
            Input::Show => {
                println!(
                    "location: {:?}  genre: {}  radius: {}",
                    flow.location_text(),
                    flow.genre().map_or("-", Genre::label),
                    flow.radius()
                );
                print!("{}", render::view(&flow.view()));
            }
            Input::Genres => print!("{}", render::genres()),
            Input::Help => print!("{HELP}"),
            Input::Quit => break,
        }
    }

    Ok(())
}

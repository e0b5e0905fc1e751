//! Pass-the-device imposter game for the terminal.
//!
//! Players hand one device around. Each one presses Enter, sees their
//! role for a few seconds, and the screen is wiped before the next.

use anyhow::{Context, Result};
use imposter::{
    Card, GamePhase, GameState, PlayerRole,
    deck::{find_preset, import_csv},
    session::{
        SessionActor, SessionConfig, SessionHandle, SessionResponse, StateChangeNotification,
    },
    settings::{JsonFileSettings, SettingsRepository},
};
use imposter_cli::{
    commands::{Command, parse_command},
    config::{CliArgs, CliConfig, DeckSource, SettingsOverrides},
    display::{COMMANDS, clear_screen, render, render_summary},
};
use log::{info, warn};
use pico_args::Arguments;
use std::{io, path::PathBuf, sync::Arc};
use tokio::sync::mpsc;

const HELP: &str = "\
Play imposter on a single device passed between players

USAGE:
  imposter_cli [OPTIONS]

OPTIONS:
  --players    N        Number of players, 3 to 20  [default: env IMPOSTER_PLAYERS or 4]
  --deck       FILE     CSV deck (Card Name,Hint)  [default: env IMPOSTER_DECK]
  --preset     NAME     Built-in deck: Places, Food, Animals  [default: Places]
  --settings   FILE     Settings file  [default: env IMPOSTER_SETTINGS or ./imposter-settings.json]
  --duration   SECS     Seconds each role stays on screen

FLAGS:
  --wild                Random number of imposters each round
  --no-hints            Imposters get no hint
  --allow-repeat        Allow the same card twice in a row
  -h, --help            Print help information

Settings given as options are saved for the next game.
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = CliArgs {
        players: pargs
            .opt_value_from_str("--players")
            .context("--players must be a number")?,
        deck: pargs.opt_value_from_str::<_, PathBuf>("--deck")?,
        preset: pargs.opt_value_from_str("--preset")?,
        settings: pargs.opt_value_from_str::<_, PathBuf>("--settings")?,
        overrides: SettingsOverrides {
            reveal_duration_seconds: pargs
                .opt_value_from_str("--duration")
                .context("--duration must be a number of seconds")?,
            wild_mode: pargs.contains("--wild"),
            no_hints: pargs.contains("--no-hints"),
            allow_repeat: pargs.contains("--allow-repeat"),
        },
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let config = CliConfig::from_env(args)?;
    run(config).await
}

async fn run(config: CliConfig) -> Result<()> {
    let deck = load_deck(&config.deck).await?;
    let repository = Arc::new(JsonFileSettings::new(&config.settings_path));
    let stored = repository.load().await;

    let (actor, handle) =
        SessionActor::new(SessionConfig::default(), deck, stored.clone(), repository);
    tokio::spawn(actor.run());

    if !config.overrides.is_empty() {
        let response = handle
            .update_settings(config.overrides.apply(stored))
            .await?;
        report(&response);
    }
    handle.update_player_count(config.player_count).await?;

    let (_, mut updates) = handle.subscribe(32).await?;
    let mut input = spawn_input_reader();
    let mut stdout = io::stdout();
    let mut state = GameState::default();
    let mut role: Option<PlayerRole> = None;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(StateChangeNotification::StateChanged { state: next, .. }) => {
                    if next.phase != GamePhase::Revealing {
                        role = None;
                    } else if role.is_none()
                        || next.current_player_index != state.current_player_index
                    {
                        role = handle.role_of(next.current_player_index).await?;
                    }
                    state = next;

                    clear_screen(&mut stdout)?;
                    println!("{}", render(&state, role.as_ref()));
                }
                Some(StateChangeNotification::Closed) | None => break,
            },

            line = input.recv() => {
                let Some(line) = line else {
                    break;
                };
                match parse_command(&line.context("Failed to read input")?) {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&handle, &state, command).await?,
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    handle.close().await?;
    Ok(())
}

async fn execute(handle: &SessionHandle, state: &GameState, command: Command) -> Result<()> {
    let response = match command {
        Command::Continue => match state.phase {
            GamePhase::Idle => handle.start_game(state.player_count).await?,
            GamePhase::Ready => handle.reveal_role().await?,
            GamePhase::Revealing => return Ok(()),
            GamePhase::Finished => return show_summary(handle).await,
        },
        Command::NewRound => handle.new_round().await?,
        Command::NewGame => handle.new_game().await?,
        Command::Players(player_count) => handle.update_player_count(player_count).await?,
        Command::Summary => return show_summary(handle).await,
        Command::Help => {
            println!("{COMMANDS}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };
    report(&response);
    Ok(())
}

async fn show_summary(handle: &SessionHandle) -> Result<()> {
    match handle.round_summary().await? {
        Some(summary) => println!("{}", render_summary(&summary)),
        None => println!("Not everyone has seen their role yet."),
    }
    Ok(())
}

fn report(response: &SessionResponse) {
    match response {
        SessionResponse::Ignored => println!("Can't do that right now."),
        SessionResponse::SuccessWithMessage(msg) => warn!("{msg}"),
        other => {
            if let Some(msg) = other.error_message() {
                println!("{msg}");
            }
        }
    }
}

async fn load_deck(source: &DeckSource) -> Result<Vec<Card>> {
    match source {
        DeckSource::Preset(name) => {
            let preset = find_preset(name)?;
            info!("Playing with the {} deck", preset.name);
            Ok(preset.cards)
        }
        DeckSource::File(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read deck {}", path.display()))?;
            let import = import_csv(&text)
                .with_context(|| format!("Failed to import deck {}", path.display()))?;
            if let Some(warning) = import.warning {
                warn!("{}: {warning}", path.display());
            }
            info!("Loaded {} cards from {}", import.cards.len(), path.display());
            Ok(import.cards)
        }
    }
}

/// Stdin is read on its own thread so a pending read never holds up
/// runtime shutdown.
fn spawn_input_reader() -> mpsc::Receiver<io::Result<String>> {
    let (sender, receiver) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in io::stdin().lines() {
            if sender.blocking_send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

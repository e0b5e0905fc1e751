//! Screen rendering for the pass-the-device terminal.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use imposter::{GamePhase, GameState, PlayerRole, RoundSummary};
use std::io::{self, Write};

pub const COMMANDS: &str = "\
  Enter          start / look at your role / show who it was
  n, next        deal a new round with the same players
  g, new         back to setup
  p, players N   set the number of players (setup only)
  s, summary     show who the imposters were (after everyone looked)
  h, help        show this list
  q, quit        leave";

/// Wipe the terminal so the next player can't see the previous role.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Text for the current screen. `role` is only shown while revealing.
pub fn render(state: &GameState, role: Option<&PlayerRole>) -> String {
    match state.phase {
        GamePhase::Idle => format!(
            "New game with {} players.\nPress Enter to deal, or 'players N' to change.",
            state.player_count
        ),
        GamePhase::Ready => format!(
            "Pass the device to player {} of {}.\nPress Enter when nobody else is looking.",
            state.current_player_index + 1,
            state.player_count
        ),
        GamePhase::Revealing => {
            let role = role.map_or_else(|| "...".to_string(), ToString::to_string);
            let countdown = state.countdown_label().unwrap_or_default();
            format!(
                "Player {}: {role}\n\nHiding in {countdown}",
                state.current_player_index + 1
            )
        }
        GamePhase::Finished => "Everyone has seen their role. Start talking!\n\
             Enter or 's' to reveal the imposters, 'n' for a new round, 'g' for a new game."
            .to_string(),
    }
}

pub fn render_summary(summary: &RoundSummary) -> String {
    format!("Round over. {summary}")
}

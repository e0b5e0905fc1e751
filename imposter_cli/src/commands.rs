use std::fmt;

/// Something the players typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter on its own: start, reveal or show the summary, by phase
    Continue,
    NewRound,
    NewGame,
    Players(usize),
    Summary,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Player count missing or not a number.
    InvalidPlayerCount(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayerCount(value) => write!(
                f,
                "Invalid player count '{value}'. Must be a number (e.g., 'players 5')"
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input into a Command.
///
/// # Examples
///
/// ```
/// use imposter_cli::commands::{Command, parse_command};
///
/// assert_eq!(parse_command(""), Ok(Command::Continue));
/// assert_eq!(parse_command("n"), Ok(Command::NewRound));
/// assert_eq!(parse_command("players 6"), Ok(Command::Players(6)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Continue),
        "n" | "next" => return Ok(Command::NewRound),
        "g" | "new" => return Ok(Command::NewGame),
        "s" | "summary" => return Ok(Command::Summary),
        "h" | "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first().map(|word| word.to_ascii_lowercase()).as_deref() {
        Some("p" | "players") => parse_players_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a player count command: "players N"
fn parse_players_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).copied().unwrap_or_default();
    value
        .parse()
        .map(Command::Players)
        .map_err(|_| ParseError::InvalidPlayerCount(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_word_commands() {
        assert_eq!(parse_command("  "), Ok(Command::Continue));
        assert_eq!(parse_command("next"), Ok(Command::NewRound));
        assert_eq!(parse_command("G"), Ok(Command::NewGame));
        assert_eq!(parse_command("summary"), Ok(Command::Summary));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("Quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_players() {
        assert_eq!(parse_command("p 3"), Ok(Command::Players(3)));
        assert_eq!(parse_command("PLAYERS 10"), Ok(Command::Players(10)));
        assert_eq!(
            parse_command("players many"),
            Err(ParseError::InvalidPlayerCount("many".to_string()))
        );
        assert_eq!(
            parse_command("players"),
            Err(ParseError::InvalidPlayerCount(String::new()))
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_command("dance").unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedCommand("dance".to_string()));
        assert!(err.to_string().contains("help"));
    }
}

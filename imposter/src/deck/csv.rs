//! CSV deck import.
//!
//! One card per line, `name,hint`. The first line is treated as a header
//! when it mentions "card" or "name". Quoting is only stripped from the
//! ends of a field; commas inside quotes are not supported.

use std::fmt;

use super::errors::{DeckError, DeckResult};
use crate::game::entities::Card;

/// Something odd about an import that didn't stop it from working.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImportWarning {
    Empty,
    HeaderMismatch,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Empty => "CSV is empty",
            Self::HeaderMismatch => "CSV header may not match expected format (Card Name,Hint)",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CsvImport {
    pub cards: Vec<Card>,
    pub warning: Option<ImportWarning>,
}

/// Parse CSV text into cards. Lines without a name are skipped.
pub fn parse_csv(text: &str) -> CsvImport {
    let text = text.trim();
    if text.is_empty() {
        return CsvImport {
            cards: Vec::new(),
            warning: Some(ImportWarning::Empty),
        };
    }

    let mut lines = text.lines();
    let first_line = lines
        .next()
        .unwrap_or_default()
        .trim_start_matches('\u{feff}');
    let header = first_line.to_lowercase();
    let has_header = header.contains("card") || header.contains("name");
    let warning = (!header.contains("card name") && !header.contains("hint"))
        .then_some(ImportWarning::HeaderMismatch);

    let data_lines = (!has_header)
        .then_some(first_line)
        .into_iter()
        .chain(lines);

    let cards = data_lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect();

    CsvImport { cards, warning }
}

/// Parse CSV text, failing when it holds no cards at all.
pub fn import_csv(text: &str) -> DeckResult<CsvImport> {
    let import = parse_csv(text);
    if import.cards.is_empty() {
        return Err(DeckError::NoValidCards);
    }
    Ok(import)
}

fn parse_line(line: &str) -> Option<Card> {
    let mut fields = line.split(',').map(clean_field);
    let name = fields.next().filter(|name| !name.is_empty())?;
    let hint = fields.next().filter(|hint| !hint.is_empty());
    Some(Card::new(name, hint))
}

fn clean_field(field: &str) -> &str {
    let field = field.trim();
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let import = parse_csv("Card Name,Hint\nPirate,ship\nDentist,teeth\n");
        assert_eq!(import.warning, None);
        assert_eq!(
            import.cards,
            vec![
                Card::new("Pirate", Some("ship")),
                Card::new("Dentist", Some("teeth")),
            ]
        );
    }

    #[test]
    fn test_parse_without_header_warns() {
        let import = parse_csv("Pirate,ship\nDentist,teeth");
        assert_eq!(import.warning, Some(ImportWarning::HeaderMismatch));
        assert_eq!(import.cards.len(), 2);
        assert_eq!(import.cards[0].name, "Pirate");
    }

    #[test]
    fn test_parse_strips_bom_quotes_and_crlf() {
        let import = parse_csv("\u{feff}\"Card Name\",\"Hint\"\r\n\"Castle\", \"stone\" \r\n");
        assert_eq!(import.warning, None);
        assert_eq!(import.cards, vec![Card::new("Castle", Some("stone"))]);
    }

    #[test]
    fn test_parse_skips_blank_and_nameless_lines() {
        let import = parse_csv("name,hint\n\n  \n,orphan hint\nRobot,\nComet");
        assert_eq!(
            import.cards,
            vec![Card::new("Robot", None), Card::new("Comet", None)]
        );
    }

    #[test]
    fn test_header_detection_with_name_only() {
        let import = parse_csv("Name\nOwl");
        assert_eq!(import.warning, Some(ImportWarning::HeaderMismatch));
        assert_eq!(import.cards, vec![Card::new("Owl", None)]);
    }

    #[test]
    fn test_empty_csv() {
        let import = parse_csv("   \n  ");
        assert_eq!(import.warning, Some(ImportWarning::Empty));
        assert!(import.cards.is_empty());
    }

    #[test]
    fn test_import_requires_a_card() {
        assert_eq!(import_csv("Card Name,Hint\n"), Err(DeckError::NoValidCards));
        assert!(import_csv("Card Name,Hint\nGhost,boo").is_ok());
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use rust_embed::Embed;
use thiserror::Error;

use crate::deck::Deck;

#[derive(Embed)]
#[folder = "assets/decks/"]
struct DeckAssets;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("unknown deck: {0}")]
    Unknown(String),
    #[error("deck {name} failed to parse: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where available decks come from: bundled assets plus a user deck directory.
/// User decks override bundled decks of the same name.
pub struct DeckCatalog {
    user_dir: PathBuf,
}

impl DeckCatalog {
    pub fn new() -> Self {
        let user_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordr")
            .join("decks");
        Self { user_dir }
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_user_dir(user_dir: PathBuf) -> Self {
        Self { user_dir }
    }

    /// Deck names available for the menu, sorted, deduplicated across sources.
    pub fn available(&self) -> Vec<String> {
        let mut names: BTreeMap<String, ()> = BTreeMap::new();
        for file in DeckAssets::iter() {
            if let Some(name) = file.strip_suffix(".json") {
                names.insert(name.to_string(), ());
            }
        }
        if let Ok(entries) = fs::read_dir(&self.user_dir) {
            for entry in entries.flatten() {
                if let Some(name) = entry
                    .file_name()
                    .to_str()
                    .and_then(|f| f.strip_suffix(".json"))
                {
                    names.insert(name.to_string(), ());
                }
            }
        }
        names.into_keys().collect()
    }

    pub fn load(&self, name: &str) -> Result<Deck, DeckError> {
        let filename = format!("{name}.json");

        // User decks take precedence over bundled ones
        let user_path = self.user_dir.join(&filename);
        if let Ok(content) = fs::read_to_string(&user_path) {
            return parse_deck(name, &content);
        }

        if let Some(file) = DeckAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                return parse_deck(name, content);
            }
        }

        Err(DeckError::Unknown(name.to_string()))
    }
}

impl Default for DeckCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_deck(name: &str, content: &str) -> Result<Deck, DeckError> {
    let mut deck: Deck = serde_json::from_str(content).map_err(|source| DeckError::Parse {
        name: name.to_string(),
        source,
    })?;
    // The filename is authoritative for progress keying
    deck.name = name.to_string();
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_decks_are_listed_and_loadable() {
        let dir = TempDir::new().unwrap();
        let catalog = DeckCatalog::with_user_dir(dir.path().to_path_buf());

        let names = catalog.available();
        assert!(names.contains(&"english-101".to_string()));

        for name in &names {
            let deck = catalog.load(name).unwrap();
            assert_eq!(&deck.name, name);
            assert!(!deck.is_empty(), "bundled deck {name} is empty");
        }
    }

    #[test]
    fn test_user_deck_overrides_bundled() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("english-101.json"),
            r#"{"name": "ignored", "language": "en", "words": [
                {"word": "override", "difficulty": 1, "frequency": 1,
                 "definition": "from the user dir", "language": "en"}
            ]}"#,
        )
        .unwrap();

        let catalog = DeckCatalog::with_user_dir(dir.path().to_path_buf());
        let deck = catalog.load("english-101").unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.words[0].word, "override");
        // Filename wins over the embedded name field
        assert_eq!(deck.name, "english-101");
    }

    #[test]
    fn test_unknown_deck_errors() {
        let dir = TempDir::new().unwrap();
        let catalog = DeckCatalog::with_user_dir(dir.path().to_path_buf());
        assert!(matches!(
            catalog.load("does-not-exist"),
            Err(DeckError::Unknown(_))
        ));
    }

    #[test]
    fn test_malformed_user_deck_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let catalog = DeckCatalog::with_user_dir(dir.path().to_path_buf());
        assert!(matches!(
            catalog.load("broken"),
            Err(DeckError::Parse { .. })
        ));
    }
}

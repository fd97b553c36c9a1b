use crate::assign::{self, TierAssignment};
use crate::item::Item;
use crate::tier::{Tier, TierTable};
use fs_err as fs;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read items: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ItemSource {
    fn load(&self) -> Result<Vec<Item>, SourceError>;

    fn describe(&self) -> String;
}

/// Every trimmed, non-empty line is one item.
pub fn parse_items(text: &str) -> Vec<Item> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Item::from)
        .collect()
}

/// Line-delimited text file. A missing file is created empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemSource for TextFileSource {
    fn load(&self) -> Result<Vec<Item>, SourceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_items(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found, creating an empty one", self.path.display());
                if let Some(parent) = self.path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&self.path, "")?;
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl ItemSource for Vec<Item> {
    fn load(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory items", self.len())
    }
}

/// The loaded items and their tier buckets. Replaced as a whole on reload.
#[derive(Debug, Clone, Default)]
pub struct Library {
    items: Vec<Item>,
    assignment: TierAssignment,
}

impl Library {
    pub fn new<R: Rng + ?Sized>(items: Vec<Item>, rng: &mut R) -> Self {
        let assignment = assign::assign(&items, rng);
        Self { items, assignment }
    }

    pub fn load<S, R>(source: &S, rng: &mut R) -> Result<Self, SourceError>
    where
        S: ItemSource + ?Sized,
        R: Rng + ?Sized,
    {
        Ok(Self::new(source.load()?, rng))
    }

    /// Re-reads `source` and swaps in a fresh partition. On error the
    /// current library is left as it was.
    pub fn reload<S, R>(&mut self, source: &S, rng: &mut R) -> Result<usize, SourceError>
    where
        S: ItemSource + ?Sized,
        R: Rng + ?Sized,
    {
        *self = Self::load(source, rng)?;
        log::info!("Loaded {} items from {}", self.len(), source.describe());
        Ok(self.len())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn assignment(&self) -> &TierAssignment {
        &self.assignment
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tier_of(&self, item: &Item, table: &TierTable) -> Tier {
        self.assignment
            .tier_of(item)
            .unwrap_or_else(|| table.default_tier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::TIER_TABLE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_parse_items_trims_and_skips_blanks() {
        let items = parse_items("  Two Sum \n\n\t\nValid Parentheses\r\n   \nLRU Cache");
        let labels: Vec<&str> = items.iter().map(Item::as_str).collect();
        assert_eq!(labels, vec!["Two Sum", "Valid Parentheses", "LRU Cache"]);
    }

    #[test]
    fn test_missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("items.txt");
        let source = TextFileSource::new(&path);

        assert!(source.load().unwrap().is_empty());
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_reload_swaps_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        std::fs::write(&path, "A\nB\n").unwrap();
        let source = TextFileSource::new(&path);
        let mut rng = ChaCha20Rng::seed_from_u64(4);

        let mut library = Library::load(&source, &mut rng).unwrap();
        assert_eq!(library.len(), 2);

        std::fs::write(&path, "A\nB\nC\nD\nE\n").unwrap();
        assert_eq!(library.reload(&source, &mut rng).unwrap(), 5);
        assert_eq!(library.assignment().len(), 5);
    }

    #[test]
    fn test_failed_reload_keeps_library() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut library = Library::new(parse_items("A\nB"), &mut rng);

        // A directory cannot be read as a file.
        let broken = TextFileSource::new(dir.path());
        assert!(library.reload(&broken, &mut rng).is_err());
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_tier_of_unknown_item_is_default() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let library = Library::new(parse_items("A"), &mut rng);
        assert_eq!(library.tier_of(&Item::from("A"), &TIER_TABLE), Tier::MilSpec);
        assert_eq!(
            library.tier_of(&Item::from("Z"), &TIER_TABLE),
            TIER_TABLE.default_tier()
        );
    }
}

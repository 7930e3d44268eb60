//! JSON file persistence for vocabulary items and theme categories.
//!
//! The store is an explicit object with an open/flush lifecycle, passed by
//! reference to the scheduler components. Mutations write through to disk
//! so an abandoned session never loses already-graded items.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use wordmem_core::{ThemeCategory, VocabularyItem};

use crate::error::{Result, StoreError};

const WORDS_FILE: &str = "words.json";
const THEMES_FILE: &str = "themes.json";

/// Vocabulary item persistence, upsert keyed by the lowercased surface
/// form. `save_all` is a full replace.
pub trait WordStore {
    fn load_all(&self) -> Result<Vec<VocabularyItem>>;
    fn save_one(&mut self, item: &VocabularyItem) -> Result<()>;
    fn save_all(&mut self, items: &[VocabularyItem]) -> Result<()>;
}

/// Theme persistence. `replace_themes` has bulk-import semantics: a full
/// replace, never a merge.
pub trait ThemeStore {
    fn themes(&self) -> Result<Vec<ThemeCategory>>;
    fn replace_themes(&mut self, themes: &[ThemeCategory]) -> Result<()>;
}

/// File-backed store holding both collections in memory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    words: Vec<VocabularyItem>,
    themes: Vec<ThemeCategory>,
}

impl JsonFileStore {
    /// Open (or create) a store rooted at `dir`.
    ///
    /// An absent themes file is seeded with the built-in default set so a
    /// fresh install can run the theme classification exercise.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let words: Vec<VocabularyItem> = read_json(&dir.join(WORDS_FILE))?;
        let themes: Vec<ThemeCategory> = read_json(&dir.join(THEMES_FILE))?;

        let mut store = Self { dir, words, themes };
        if store.themes.is_empty() {
            store.themes = default_themes();
            write_json(&store.dir.join(THEMES_FILE), &store.themes)?;
        }

        tracing::debug!(
            words = store.words.len(),
            themes = store.themes.len(),
            dir = %store.dir.display(),
            "opened store"
        );
        Ok(store)
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordmem");
        Self::open(dir)
    }

    /// Directory holding the store files; companion state (like the daily
    /// fill-in-blank pool) lives alongside them.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both collections out. Mutating operations already write
    /// through; flush exists for explicit shutdown paths.
    pub fn flush(&self) -> Result<()> {
        write_json(&self.dir.join(WORDS_FILE), &self.words)?;
        write_json(&self.dir.join(THEMES_FILE), &self.themes)
    }
}

impl WordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<VocabularyItem>> {
        Ok(self.words.clone())
    }

    fn save_one(&mut self, item: &VocabularyItem) -> Result<()> {
        let key = item.key();
        match self.words.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = item.clone(),
            None => self.words.push(item.clone()),
        }
        write_json(&self.dir.join(WORDS_FILE), &self.words)?;
        tracing::debug!(word = %item.word, "saved item");
        Ok(())
    }

    fn save_all(&mut self, items: &[VocabularyItem]) -> Result<()> {
        self.words = items.to_vec();
        write_json(&self.dir.join(WORDS_FILE), &self.words)
    }
}

impl ThemeStore for JsonFileStore {
    fn themes(&self) -> Result<Vec<ThemeCategory>> {
        Ok(self.themes.clone())
    }

    fn replace_themes(&mut self, themes: &[ThemeCategory]) -> Result<()> {
        self.themes = themes.to_vec();
        write_json(&self.dir.join(THEMES_FILE), &self.themes)?;
        tracing::info!(count = self.themes.len(), "replaced theme set");
        Ok(())
    }
}

/// The built-in starter themes a fresh install gets.
pub fn default_themes() -> Vec<ThemeCategory> {
    let theme = |name: &str, words: &[&str]| {
        ThemeCategory::new(name, words.iter().map(|w| w.to_string()).collect())
    };
    vec![
        theme("校园", &["blackboard", "teacher", "student", "classroom", "desk", "book"]),
        theme("家庭", &["mother", "father", "kitchen", "sofa", "bedroom", "dinner"]),
        theme("自然", &["tree", "river", "mountain", "cloud", "flower", "sun"]),
        theme("交通", &["car", "bus", "train", "airplane", "station", "driver"]),
        theme("動物", &["cat", "dog", "bird", "fish", "elephant", "lion"]),
        theme("食物", &["apple", "banana", "bread", "milk", "cheese", "water"]),
    ]
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| StoreError::invalid_format(&err))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(|err| StoreError::invalid_format(&err))?;
    fs::write(path, raw)?;
    Ok(())
}

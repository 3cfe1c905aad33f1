use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::database::app_list::AppListEntry;
use crate::database::entry::GameDbEntry;
use crate::library::GameId;

#[derive(Debug)]
pub enum DbError {
    Io(io::Error),
    Codec(bitcode::Error),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Io(err) => write!(f, "database file error: {}", err),
            DbError::Codec(err) => write!(f, "database encoding error: {}", err),
        }
    }
}

impl std::error::Error for DbError {}

impl From<io::Error> for DbError {
    fn from(err: io::Error) -> Self {
        DbError::Io(err)
    }
}

impl From<bitcode::Error> for DbError {
    fn from(err: bitcode::Error) -> Self {
        DbError::Codec(err)
    }
}

/// The reference database: metadata per game id.
///
/// Mutation happens between categorization runs. During a run the
/// database is shared as `Arc<GameDb>`, so strategies only ever read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDb {
    games: HashMap<GameId, GameDbEntry>,
}

impl GameDb {
    pub fn new() -> Self {
        GameDb {
            games: HashMap::new(),
        }
    }

    pub fn insert(&mut self, entry: GameDbEntry) {
        self.games.insert(entry.id, entry);
    }

    pub fn get(&self, id: GameId) -> Option<&GameDbEntry> {
        self.games.get(&id)
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameDbEntry> {
        self.games.values()
    }

    /// Merge a fetched app list: ids not yet present get a bare entry,
    /// existing entries keep their fields. Returns how many were added.
    pub fn integrate_app_list(&mut self, entries: Vec<AppListEntry>) -> usize {
        let mut added = 0;
        for entry in entries {
            if !self.games.contains_key(&entry.appid) {
                self.games
                    .insert(entry.appid, GameDbEntry::new(entry.appid, &entry.name));
                added += 1;
            }
        }
        if added > 0 {
            log::debug!("integrated app list: {} new entries", added);
        }
        added
    }

    /// Write the database to a compact binary cache file.
    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        let bytes = bitcode::serialize(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a database back from its cache file.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        let bytes = fs::read(path)?;
        let db = bitcode::deserialize(&bytes)?;
        Ok(db)
    }
}

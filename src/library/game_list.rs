use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::error::StoreError;
use crate::library::category::{Category, CategoryStore};
use crate::library::game::{GameId, GameInfo};

/// In-memory store of the user's games and their category memberships.
///
/// Every operation takes `&self`; interior locking makes one
/// `Arc<GameList>` shareable between strategy bindings and the batch
/// driver. The category store lives here too, so category lookups and
/// membership edits go through one place.
#[derive(Debug, Default)]
pub struct GameList {
    games: RwLock<HashMap<GameId, GameInfo>>,
    categories: CategoryStore,
}

impl GameList {
    pub fn new() -> Self {
        GameList {
            games: RwLock::new(HashMap::new()),
            categories: CategoryStore::new(),
        }
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    /// Insert or replace a game.
    pub fn add_game(&self, game: GameInfo) -> Result<(), StoreError> {
        let mut games = self
            .games
            .write()
            .map_err(|_| StoreError::LockPoisoned("game write"))?;
        games.insert(game.id, game);
        Ok(())
    }

    /// Snapshot of one game.
    pub fn game(&self, id: GameId) -> Result<Option<GameInfo>, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        Ok(games.get(&id).cloned())
    }

    pub fn contains(&self, id: GameId) -> Result<bool, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        Ok(games.contains_key(&id))
    }

    /// All game ids, sorted for deterministic iteration.
    pub fn ids(&self) -> Result<Vec<GameId>, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        let mut ids: Vec<GameId> = games.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Snapshots of every game, in id order.
    pub fn games(&self) -> Result<Vec<GameInfo>, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        let mut all: Vec<GameInfo> = games.values().cloned().collect();
        all.sort_unstable_by_key(|game| game.id);
        Ok(all)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        Ok(games.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Add the game to a category. Returns whether membership changed;
    /// `false` also covers an unknown game id.
    pub fn add_category(&self, id: GameId, category: &Arc<Category>) -> Result<bool, StoreError> {
        let mut games = self
            .games
            .write()
            .map_err(|_| StoreError::LockPoisoned("game write"))?;
        match games.get_mut(&id) {
            Some(game) => Ok(game.categories.insert(category.name().to_string())),
            None => Ok(false),
        }
    }

    /// Remove the game from a category by name.
    pub fn remove_category(&self, id: GameId, name: &str) -> Result<bool, StoreError> {
        let mut games = self
            .games
            .write()
            .map_err(|_| StoreError::LockPoisoned("game write"))?;
        match games.get_mut(&id) {
            Some(game) => Ok(game.categories.remove(name)),
            None => Ok(false),
        }
    }

    /// Remove the game from every category.
    pub fn clear_categories(&self, id: GameId) -> Result<(), StoreError> {
        let mut games = self
            .games
            .write()
            .map_err(|_| StoreError::LockPoisoned("game write"))?;
        if let Some(game) = games.get_mut(&id) {
            game.categories.clear();
        }
        Ok(())
    }

    pub fn categories_of(&self, id: GameId) -> Result<BTreeSet<String>, StoreError> {
        let games = self
            .games
            .read()
            .map_err(|_| StoreError::LockPoisoned("game read"))?;
        Ok(games
            .get(&id)
            .map(|game| game.categories.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_fetch() {
        let list = GameList::new();
        list.add_game(GameInfo::new(10, "Half-Life")).unwrap();

        assert!(list.contains(10).unwrap());
        assert!(!list.contains(20).unwrap());
        assert_eq!(list.game(10).unwrap().unwrap().name, "Half-Life");
        assert_eq!(list.len().unwrap(), 1);
    }

    #[test]
    fn ids_are_sorted() {
        let list = GameList::new();
        list.add_game(GameInfo::new(30, "c")).unwrap();
        list.add_game(GameInfo::new(10, "a")).unwrap();
        list.add_game(GameInfo::new(20, "b")).unwrap();

        assert_eq!(list.ids().unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn category_membership_round_trip() {
        let list = GameList::new();
        list.add_game(GameInfo::new(10, "Half-Life")).unwrap();
        let shooter = list.categories().get_or_create("Shooter").unwrap();

        assert!(list.add_category(10, &shooter).unwrap());
        assert!(!list.add_category(10, &shooter).unwrap());
        assert!(list.categories_of(10).unwrap().contains("Shooter"));

        assert!(list.remove_category(10, "Shooter").unwrap());
        assert!(list.categories_of(10).unwrap().is_empty());
    }

    #[test]
    fn add_category_to_unknown_game_is_a_no_op() {
        let list = GameList::new();
        let cat = list.categories().get_or_create("Shooter").unwrap();

        assert!(!list.add_category(99, &cat).unwrap());
    }

    #[test]
    fn clear_categories_empties_membership() {
        let list = GameList::new();
        list.add_game(GameInfo::new(10, "Half-Life")).unwrap();
        let a = list.categories().get_or_create("A").unwrap();
        let b = list.categories().get_or_create("B").unwrap();
        list.add_category(10, &a).unwrap();
        list.add_category(10, &b).unwrap();

        list.clear_categories(10).unwrap();

        assert!(list.categories_of(10).unwrap().is_empty());
        // The store still knows the categories themselves.
        assert_eq!(list.categories().len().unwrap(), 2);
    }
}

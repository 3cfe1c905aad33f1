use std::sync::Arc;

use crate::database::GameDb;
use crate::error::AutoCatError;
use crate::library::GameList;

/// The stores a scheme works against between `pre_process` and
/// `de_process`.
#[derive(Clone)]
pub struct Binding {
    pub games: Arc<GameList>,
    pub db: Arc<GameDb>,
}

/// State every categorization scheme embeds: its name, an optional filter
/// name, and the runtime binding.
///
/// Cloning keeps the configuration and drops the binding, so clones
/// always start unbound.
pub struct AutoCatCore {
    name: String,
    filter: Option<String>,
    binding: Option<Binding>,
}

impl AutoCatCore {
    pub fn new(name: &str) -> Self {
        AutoCatCore {
            name: name.to_string(),
            filter: None,
            binding: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn set_filter(&mut self, filter: Option<&str>) {
        self.filter = filter.map(|name| name.to_string());
    }

    /// The name, suffixed `*` when a filter is set.
    pub fn display_name(&self) -> String {
        match self.filter {
            Some(_) => format!("{}*", self.name),
            None => self.name.clone(),
        }
    }

    pub fn bind(&mut self, games: Arc<GameList>, db: Arc<GameDb>) {
        self.binding = Some(Binding { games, db });
    }

    pub fn unbind(&mut self) {
        self.binding = None;
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The active binding. Outside a `pre_process` window this is a
    /// contract violation, logged and returned as `NotBound`.
    pub fn binding(&self) -> Result<&Binding, AutoCatError> {
        match &self.binding {
            Some(binding) => Ok(binding),
            None => {
                log::error!("autocat {} invoked while unbound", self.name);
                Err(AutoCatError::NotBound {
                    autocat: self.name.clone(),
                })
            }
        }
    }
}

impl Clone for AutoCatCore {
    fn clone(&self) -> Self {
        AutoCatCore {
            name: self.name.clone(),
            filter: self.filter.clone(),
            binding: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_marks_filtered_schemes() {
        let mut core = AutoCatCore::new("By Genre");
        assert_eq!(core.display_name(), "By Genre");

        core.set_filter(Some("Installed"));
        assert_eq!(core.display_name(), "By Genre*");
        assert_eq!(core.filter(), Some("Installed"));
    }

    #[test]
    fn binding_errors_when_unbound() {
        let core = AutoCatCore::new("scheme");

        match core.binding() {
            Err(AutoCatError::NotBound { autocat }) => assert_eq!(autocat, "scheme"),
            other => panic!("expected NotBound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn clone_is_unbound() {
        let mut core = AutoCatCore::new("scheme");
        core.bind(Arc::new(GameList::new()), Arc::new(GameDb::new()));
        assert!(core.is_bound());

        let clone = core.clone();
        assert!(!clone.is_bound());
        assert_eq!(clone.name(), "scheme");
    }

    #[test]
    fn unbind_releases_the_stores() {
        let mut core = AutoCatCore::new("scheme");
        let games = Arc::new(GameList::new());
        core.bind(games.clone(), Arc::new(GameDb::new()));

        core.unbind();

        assert!(!core.is_bound());
        assert_eq!(Arc::strong_count(&games), 1);
    }
}

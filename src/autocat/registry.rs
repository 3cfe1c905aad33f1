use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::dev_pub::AutoCatDevPub;
use crate::autocat::flags::AutoCatFlags;
use crate::autocat::genre::AutoCatGenre;
use crate::autocat::group::AutoCatGroup;
use crate::autocat::hltb::AutoCatHltb;
use crate::autocat::manual::AutoCatManual;
use crate::autocat::name::AutoCatName;
use crate::autocat::tags::AutoCatTags;
use crate::autocat::user_score::AutoCatUserScore;
use crate::autocat::year::AutoCatYear;
use crate::persist::ElementReader;

/// Discriminant for every scheme the crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoCatKind {
    Genre,
    Flags,
    Tags,
    Year,
    UserScore,
    Hltb,
    Manual,
    DevPub,
    Group,
    Name,
}

impl AutoCatKind {
    pub const ALL: [AutoCatKind; 10] = [
        AutoCatKind::Genre,
        AutoCatKind::Flags,
        AutoCatKind::Tags,
        AutoCatKind::Year,
        AutoCatKind::UserScore,
        AutoCatKind::Hltb,
        AutoCatKind::Manual,
        AutoCatKind::DevPub,
        AutoCatKind::Group,
        AutoCatKind::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoCatKind::Genre => "Genre",
            AutoCatKind::Flags => "Flags",
            AutoCatKind::Tags => "Tags",
            AutoCatKind::Year => "Year",
            AutoCatKind::UserScore => "UserScore",
            AutoCatKind::Hltb => "Hltb",
            AutoCatKind::Manual => "Manual",
            AutoCatKind::DevPub => "DevPub",
            AutoCatKind::Group => "Group",
            AutoCatKind::Name => "Name",
        }
    }
}

impl fmt::Display for AutoCatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Factory = fn(&str) -> Box<dyn AutoCat>;
type Loader = fn(&ElementReader<'_>) -> Box<dyn AutoCat>;

/// Kind to default-instance factory, populated once and never mutated.
static FACTORIES: Lazy<HashMap<AutoCatKind, Factory>> = Lazy::new(|| {
    let mut map: HashMap<AutoCatKind, Factory> = HashMap::new();
    map.insert(AutoCatKind::Genre, |name| Box::new(AutoCatGenre::new(name)));
    map.insert(AutoCatKind::Flags, |name| Box::new(AutoCatFlags::new(name)));
    map.insert(AutoCatKind::Tags, |name| Box::new(AutoCatTags::new(name)));
    map.insert(AutoCatKind::Year, |name| Box::new(AutoCatYear::new(name)));
    map.insert(AutoCatKind::UserScore, |name| {
        Box::new(AutoCatUserScore::new(name))
    });
    map.insert(AutoCatKind::Hltb, |name| Box::new(AutoCatHltb::new(name)));
    map.insert(AutoCatKind::Manual, |name| {
        Box::new(AutoCatManual::new(name))
    });
    map.insert(AutoCatKind::DevPub, |name| {
        Box::new(AutoCatDevPub::new(name))
    });
    map.insert(AutoCatKind::Group, |name| Box::new(AutoCatGroup::new(name)));
    map.insert(AutoCatKind::Name, |name| Box::new(AutoCatName::new(name)));
    map
});

/// Persisted type id to element loader, populated once and never mutated.
static LOADERS: Lazy<HashMap<&'static str, Loader>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Loader> = HashMap::new();
    map.insert(AutoCatGenre::TYPE_ID, |reader| {
        Box::new(AutoCatGenre::load_from_element(reader))
    });
    map.insert(AutoCatFlags::TYPE_ID, |reader| {
        Box::new(AutoCatFlags::load_from_element(reader))
    });
    map.insert(AutoCatTags::TYPE_ID, |reader| {
        Box::new(AutoCatTags::load_from_element(reader))
    });
    map.insert(AutoCatYear::TYPE_ID, |reader| {
        Box::new(AutoCatYear::load_from_element(reader))
    });
    map.insert(AutoCatUserScore::TYPE_ID, |reader| {
        Box::new(AutoCatUserScore::load_from_element(reader))
    });
    map.insert(AutoCatHltb::TYPE_ID, |reader| {
        Box::new(AutoCatHltb::load_from_element(reader))
    });
    map.insert(AutoCatManual::TYPE_ID, |reader| {
        Box::new(AutoCatManual::load_from_element(reader))
    });
    map.insert(AutoCatDevPub::TYPE_ID, |reader| {
        Box::new(AutoCatDevPub::load_from_element(reader))
    });
    map.insert(AutoCatGroup::TYPE_ID, |reader| {
        Box::new(AutoCatGroup::load_from_element(reader))
    });
    map.insert(AutoCatName::TYPE_ID, |reader| {
        Box::new(AutoCatName::load_from_element(reader))
    });
    map
});

/// Build a default-configured scheme of the given kind.
pub fn create(kind: AutoCatKind, name: &str) -> Box<dyn AutoCat> {
    FACTORIES[&kind](name)
}

/// Reconstruct a scheme from a persisted element. `None` when the tag is
/// not a known type id; callers skip such elements rather than abort.
pub fn load_autocat_from_element(element: &Value) -> Option<Box<dyn AutoCat>> {
    let (tag, reader) = ElementReader::open(element)?;
    match LOADERS.get(tag) {
        Some(loader) => Some(loader(&reader)),
        None => {
            log::warn!("skipping unrecognized autocat element {:?}", tag);
            None
        }
    }
}

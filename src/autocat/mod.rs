mod autocat;
mod core;
mod dev_pub;
mod flags;
mod genre;
mod group;
mod hltb;
mod manual;
mod name;
mod registry;
mod result;
mod rules;
mod scoring;
mod tags;
mod user_score;
mod year;

pub use self::core::{AutoCatCore, Binding};
pub use autocat::{compare_autocats, sort_autocats, AutoCat};
pub use dev_pub::AutoCatDevPub;
pub use flags::AutoCatFlags;
pub use genre::AutoCatGenre;
pub use group::{AutoCatGroup, GameGroup};
pub use hltb::AutoCatHltb;
pub use manual::AutoCatManual;
pub use name::AutoCatName;
pub use registry::{create, load_autocat_from_element, AutoCatKind};
pub use result::CategorizeResult;
pub use rules::{steam_labels_preset, HltbRule, UserScoreRule};
pub use scoring::wilson_lower_bound;
pub use tags::AutoCatTags;
pub use user_score::AutoCatUserScore;
pub use year::AutoCatYear;

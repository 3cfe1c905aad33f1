mod element;
mod file;

pub use element::{ChildWriter, ElementReader, ElementWriter};
pub use file::{load_autocats, save_autocats, LoadedAutoCats, PersistError};

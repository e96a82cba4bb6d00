//! Locating, downloading and inspecting `.aff`/`.dic` pairs on disk.

pub mod manager;

pub use manager::{load_checker, DictionaryFiles};

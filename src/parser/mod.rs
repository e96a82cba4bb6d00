//! Readers for the Hunspell `.aff` and `.dic` text formats.
//!
//! Callers supply file contents; nothing here touches the filesystem.

pub mod aff;
pub mod dic;

pub use aff::parse_aff_file;
pub use dic::{parse_dic_entries, parse_dic_file};

pub mod assembler;
pub mod converter;
pub mod inflection;
pub mod kana;
pub mod merger;
pub mod reference;
pub mod search;

pub use assembler::{AssemblerOptions, EntryAssembler};
pub use converter::KindleConverter;
pub use inflection::JapaneseInflector;
pub use merger::merge_entries;
pub use reference::ReferenceDictionary;
pub use search::build_search_data;

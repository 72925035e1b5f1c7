pub mod dictionary;
pub mod error;
pub mod language;
pub mod markup;
pub mod types;

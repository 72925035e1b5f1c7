pub mod loaders;
pub mod types;

pub use loaders::term_bank::TermBankLoader;
pub use types::{LoadError, TermBankRow};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Secondary term-bank directory supplying frequencies, inflection
    /// classes and alternate writings
    pub reference_path: Option<String>,
}

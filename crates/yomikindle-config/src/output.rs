use serde::{Deserialize, Serialize};

fn default_entries_per_file() -> usize {
    10_000
}

fn default_index_name() -> String {
    "j".to_string()
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_headword_separator() -> String {
    "・".to_string()
}

fn default_first_line_as_headword() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Entries written per `entries-<n>.html` file
    #[serde(default = "default_entries_per_file")]
    pub entries_per_file: usize,
    /// Kindle lookup index name shared by every entry
    #[serde(default = "default_index_name")]
    pub index_name: String,
    /// Input and output language of the dictionary
    #[serde(default = "default_language")]
    pub language: String,
    /// Joins merged headwords in the bold headword line
    #[serde(default = "default_headword_separator")]
    pub headword_separator: String,
    /// Indent generated XHTML and OPF
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_first_line_as_headword")]
    pub first_line_as_headword: bool,
}

impl OutputConfig {
    /// `ENTRIES_PER_FILE`; unparsable or zero values are ignored
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(entries_per_file) = lookup("ENTRIES_PER_FILE")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
        {
            self.entries_per_file = entries_per_file;
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            entries_per_file: default_entries_per_file(),
            index_name: default_index_name(),
            language: default_language(),
            headword_separator: default_headword_separator(),
            pretty: false,
            first_line_as_headword: default_first_line_as_headword(),
        }
    }
}

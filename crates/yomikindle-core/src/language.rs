use std::fmt;
use std::str::FromStr;

use crate::types::InflectionRecord;

/// Generator for the inflected surface forms of a headword
pub trait Inflector: Send + Sync {
    /// Derive every surface form of `term` for the space-separated `classes` tags.
    ///
    /// `original_term` is the headword of the entry `term` was taken from; it
    /// differs from `term` for reading-derived lookup strings.
    fn inflect(&self, term: &str, classes: &str, original_term: &str) -> Vec<InflectionRecord>;
}

/// Closed set of inflection classes a term-bank row may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InflectionClass {
    Godan,
    Ichidan,
    Suru,
    Kuru,
    Zuru,
    IAdjective,
}

impl InflectionClass {
    pub const ALL: [InflectionClass; 6] = [
        InflectionClass::Godan,
        InflectionClass::Ichidan,
        InflectionClass::Suru,
        InflectionClass::Kuru,
        InflectionClass::Zuru,
        InflectionClass::IAdjective,
    ];

    /// Tag used in term-bank files
    pub fn as_tag(&self) -> &'static str {
        match self {
            InflectionClass::Godan => "v5",
            InflectionClass::Ichidan => "v1",
            InflectionClass::Suru => "vs",
            InflectionClass::Kuru => "vk",
            InflectionClass::Zuru => "vz",
            InflectionClass::IAdjective => "adj-i",
        }
    }

    /// Known classes in a space-separated tag list; unknown tags are skipped
    pub fn parse_list(tags: &str) -> impl Iterator<Item = InflectionClass> + '_ {
        tags.split_whitespace().filter_map(|tag| tag.parse().ok())
    }

    /// Tags of a space-separated list that are outside the closed set
    pub fn unknown_tags(tags: &str) -> impl Iterator<Item = &str> {
        tags.split_whitespace()
            .filter(|tag| tag.parse::<InflectionClass>().is_err())
    }
}

impl FromStr for InflectionClass {
    type Err = UnknownInflectionClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v5" | "Godan" => Ok(InflectionClass::Godan),
            "v1" | "Ichidan" => Ok(InflectionClass::Ichidan),
            "vs" | "Suru" => Ok(InflectionClass::Suru),
            "vk" | "Kuru" => Ok(InflectionClass::Kuru),
            "vz" | "Zuru" => Ok(InflectionClass::Zuru),
            "adj-i" | "IAdjective" => Ok(InflectionClass::IAdjective),
            other => Err(UnknownInflectionClass(other.to_string())),
        }
    }
}

impl fmt::Display for InflectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown inflection class: {0}")]
pub struct UnknownInflectionClass(pub String);

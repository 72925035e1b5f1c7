use std::collections::HashMap;

/// One derived surface form of a headword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionRecord {
    /// Paradigm slot label, e.g. "連用形"
    pub rule_name: String,
    pub surface_form: String,
}

impl InflectionRecord {
    pub fn new(rule_name: impl Into<String>, surface_form: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            surface_form: surface_form.into(),
        }
    }
}

/// A lookup string and every inflected form derived from it.
///
/// `inflections` never contains `base_form` itself or an empty form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDatum {
    pub base_form: String,
    pub inflections: Vec<InflectionRecord>,
}

impl SearchDatum {
    pub fn new(base_form: impl Into<String>) -> Self {
        Self {
            base_form: base_form.into(),
            inflections: Vec::new(),
        }
    }

    /// Adds inflections whose surface form is not present yet, keeping the first rule name
    pub fn absorb(&mut self, inflections: impl IntoIterator<Item = InflectionRecord>) {
        for inflection in inflections {
            if inflection.surface_form.is_empty() || inflection.surface_form == self.base_form {
                continue;
            }
            if self
                .inflections
                .iter()
                .all(|known| known.surface_form != inflection.surface_form)
            {
                self.inflections.push(inflection);
            }
        }
    }

    /// Base form followed by every inflection surface form
    pub fn lookup_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.base_form.as_str())
            .chain(self.inflections.iter().map(|i| i.surface_form.as_str()))
    }
}

/// Output unit handed to the document renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindleEntry {
    /// Unique, in first-seen order
    pub headwords: Vec<String>,
    pub bold_headword: bool,
    /// Unique by `base_form`
    pub search_data: Vec<SearchDatum>,
    /// Rendered body markup
    pub body: String,
    pub frequency: i64,
}

impl KindleEntry {
    /// Every distinct lookup string of the entry, in order
    pub fn lookup_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = Vec::new();
        for datum in &self.search_data {
            for form in datum.lookup_forms() {
                if !forms.contains(&form) {
                    forms.push(form);
                }
            }
        }
        forms
    }
}

/// Remap table from an asset path in the source dictionary to its output path
#[derive(Debug, Clone, Default)]
pub struct AssetPaths {
    paths: HashMap<String, String>,
    order: Vec<String>,
}

impl AssetPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, rewritten: impl Into<String>) {
        let original = original.into();
        if !self.paths.contains_key(&original) {
            self.order.push(original.clone());
        }
        self.paths.insert(original, rewritten.into());
    }

    /// Rewritten path, or `original` itself when it was never remapped
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.paths.get(original).map(String::as_str).unwrap_or(original)
    }

    /// Rewritten paths in insertion order
    pub fn rewritten(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter_map(|original| self.paths.get(original).map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_datum_absorb_skips_known_forms() {
        let mut datum = SearchDatum::new("見る");
        datum.absorb([InflectionRecord::new("命令形", "見ろ")]);
        datum.absorb([
            InflectionRecord::new("other", "見ろ"),
            InflectionRecord::new("self", "見る"),
            InflectionRecord::new("empty", ""),
            InflectionRecord::new("仮定形", "見れ"),
        ]);
        let forms: Vec<_> = datum.lookup_forms().collect();
        assert_eq!(forms, vec!["見る", "見ろ", "見れ"]);
        assert_eq!(datum.inflections[0].rule_name, "命令形");
    }

    #[test]
    fn test_asset_paths_fall_back_to_original() {
        let mut assets = AssetPaths::new();
        assets.insert("img/a.png", "i/0.png");
        assets.insert("img/b.png", "i/1.png");
        assert_eq!(assets.resolve("img/a.png"), "i/0.png");
        assert_eq!(assets.resolve("img/c.png"), "img/c.png");
        assert_eq!(assets.rewritten().collect::<Vec<_>>(), vec!["i/0.png", "i/1.png"]);
    }
}

use rayon::prelude::*;
use yomikindle_core::dictionary::DictionaryEntry;
use yomikindle_core::language::Inflector;
use yomikindle_core::types::{AssetPaths, KindleEntry};

use crate::assembler::{AssemblerOptions, EntryAssembler};
use crate::inflection::JapaneseInflector;
use crate::merger::merge_entries;
use crate::search::build_search_data;

/// Dictionary entries in, merged Kindle entries out
pub struct KindleConverter<I: Inflector = JapaneseInflector> {
    inflector: I,
    options: AssemblerOptions,
}

impl KindleConverter<JapaneseInflector> {
    pub fn new(options: AssemblerOptions) -> Self {
        Self::with_inflector(JapaneseInflector::new(), options)
    }
}

impl<I: Inflector> KindleConverter<I> {
    pub fn with_inflector(inflector: I, options: AssemblerOptions) -> Self {
        Self { inflector, options }
    }

    pub fn convert(&self, entries: &[DictionaryEntry], assets: &AssetPaths) -> Vec<KindleEntry> {
        let assembler = EntryAssembler::new(assets, self.options.clone());

        let assembled: Vec<KindleEntry> = entries
            .par_iter()
            .map(|entry| {
                let search_data = build_search_data(entry, &self.inflector);
                assembler.assemble(entry, search_data)
            })
            .collect();

        let assembled_count = assembled.len();
        let merged = merge_entries(assembled);
        tracing::debug!(
            "Assembled {} entries, {} after merging identical bodies",
            assembled_count,
            merged.len()
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use yomikindle_core::dictionary::Definition;

    use super::*;

    fn entry(term: &str, reading: &str, classes: &str, frequency: i64, body: &str) -> DictionaryEntry {
        let definitions: Vec<Definition> = serde_json::from_value(json!([body])).expect("valid");
        DictionaryEntry {
            term: term.into(),
            reading: reading.into(),
            definition_tag: None,
            inflection_class: classes.into(),
            frequency,
            definitions,
            sequence: 0,
            tag: String::new(),
        }
    }

    #[test]
    fn test_convert_merges_and_orders() {
        let entries = vec![
            entry("猫", "ねこ", "", 2, "ねこ【猫】"),
            entry("見る", "みる", "v1", 5, "みる【見る】"),
            entry("視る", "みる", "v1", 12, "みる【見る】"),
        ];
        let converted = KindleConverter::new(AssemblerOptions::default()).convert(&entries, &AssetPaths::new());

        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].headwords, vec!["見る", "視る"]);
        assert_eq!(converted[0].frequency, 12);
        assert_eq!(converted[1].headwords, vec!["猫"]);

        let forms = converted[0].lookup_forms();
        for expected in ["見る", "みる", "見ろ", "みよ", "視る", "視れ"] {
            assert!(forms.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_iteration_mark_forms_reach_output() {
        let entries = vec![entry("民民", "たみたみ", "", 0, "x")];
        let converted = KindleConverter::new(AssemblerOptions::default()).convert(&entries, &AssetPaths::new());
        assert!(converted[0].lookup_forms().contains(&"民々"));
    }
}

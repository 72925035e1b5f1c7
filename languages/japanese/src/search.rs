use yomikindle_core::dictionary::DictionaryEntry;
use yomikindle_core::language::Inflector;
use yomikindle_core::types::SearchDatum;

use crate::kana::{ITERATION_MARK, is_kanji};

/// Lookup strings of an entry: term, reading, then one iteration-mark variant
/// per adjacent pair of repeated kanji. Duplicates are dropped.
pub fn base_forms(entry: &DictionaryEntry) -> Vec<String> {
    let mut forms: Vec<String> = Vec::new();
    let mut push = |form: String| {
        if !form.is_empty() && !forms.contains(&form) {
            forms.push(form);
        }
    };

    push(entry.term.clone());
    push(entry.reading.clone());

    let chars: Vec<char> = entry.term.chars().collect();
    for (i, pair) in chars.windows(2).enumerate() {
        if pair[0] == pair[1] && is_kanji(pair[0]) {
            let mut variant = chars.clone();
            variant[i + 1] = ITERATION_MARK;
            push(variant.into_iter().collect());
        }
    }

    forms
}

/// Attach generated inflections to every lookup string of the entry
pub fn build_search_data(entry: &DictionaryEntry, inflector: &dyn Inflector) -> Vec<SearchDatum> {
    base_forms(entry)
        .into_iter()
        .map(|base_form| {
            let inflections = inflector.inflect(&base_form, &entry.inflection_class, &entry.term);
            SearchDatum {
                base_form,
                inflections,
            }
        })
        .collect()
}

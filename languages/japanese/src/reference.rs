use std::collections::{HashMap, HashSet};

use yomikindle_core::dictionary::DictionaryEntry;

/// Secondary dictionary consulted for frequency, inflection classes and
/// alternate writings
pub struct ReferenceDictionary {
    entries: Vec<DictionaryEntry>,
    /// term -> reading groups in first-seen order, each holding entry indices
    by_term: HashMap<String, Vec<(String, Vec<usize>)>>,
    by_sequence: HashMap<i64, Vec<usize>>,
}

impl ReferenceDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        let mut by_term: HashMap<String, Vec<(String, Vec<usize>)>> = HashMap::new();
        let mut by_sequence: HashMap<i64, Vec<usize>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            let readings = by_term.entry(entry.term.clone()).or_default();
            match readings.iter_mut().find(|(reading, _)| *reading == entry.reading) {
                Some((_, indices)) => indices.push(idx),
                None => readings.push((entry.reading.clone(), vec![idx])),
            }
            by_sequence.entry(entry.sequence).or_default().push(idx);
        }

        Self {
            entries,
            by_term,
            by_sequence,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Reference rows for the entry: same term and reading, or the first
    /// reading group of the term when the entry has no reading
    fn matches(&self, entry: &DictionaryEntry) -> Option<&[usize]> {
        let readings = self.by_term.get(&entry.term)?;
        if entry.reading.is_empty() {
            readings.first().map(|(_, indices)| indices.as_slice())
        } else {
            readings
                .iter()
                .find(|(reading, _)| *reading == entry.reading)
                .map(|(_, indices)| indices.as_slice())
        }
    }

    /// Enrich `entries` in place and append alternate writings found through
    /// shared sequence numbers
    pub fn merge_into(&self, mut entries: Vec<DictionaryEntry>) -> Vec<DictionaryEntry> {
        let known_terms: HashSet<String> = entries.iter().map(|e| e.term.clone()).collect();
        let mut alternates = Vec::new();
        let mut added: HashSet<&str> = HashSet::new();

        for entry in &mut entries {
            let Some(matched) = self.matches(entry) else {
                continue;
            };
            let matched: Vec<&DictionaryEntry> = matched.iter().map(|&idx| &self.entries[idx]).collect();

            if let Some(frequency) = matched.iter().map(|r| r.frequency).max() {
                entry.frequency = frequency;
            }

            if entry.inflection_class.is_empty() {
                let mut classes: Vec<&str> = Vec::new();
                for tag in matched.iter().flat_map(|r| r.inflection_class.split_whitespace()) {
                    if !classes.contains(&tag) {
                        classes.push(tag);
                    }
                }
                entry.inflection_class = classes.join(" ");
            }

            for reference in &matched {
                let Some(writings) = self.by_sequence.get(&reference.sequence) else {
                    continue;
                };
                for &idx in writings {
                    let alternate = &self.entries[idx].term;
                    if *alternate == entry.term
                        || known_terms.contains(alternate)
                        || !added.insert(alternate.as_str())
                    {
                        continue;
                    }
                    alternates.push(DictionaryEntry {
                        term: alternate.clone(),
                        ..entry.clone()
                    });
                }
            }
        }

        tracing::debug!("Added {} alternate writings from reference", alternates.len());
        entries.extend(alternates);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(term: &str, reading: &str, classes: &str, frequency: i64, sequence: i64) -> DictionaryEntry {
        DictionaryEntry {
            term: term.into(),
            reading: reading.into(),
            definition_tag: None,
            inflection_class: classes.into(),
            frequency,
            definitions: vec![],
            sequence,
            tag: String::new(),
        }
    }

    fn reference() -> ReferenceDictionary {
        ReferenceDictionary::new(vec![
            row("見る", "みる", "v1", 40, 10),
            row("見る", "みる", "v1", 55, 10),
            row("観る", "みる", "v1", 3, 10),
            row("視る", "みる", "v1", 1, 10),
            row("高い", "たかい", "adj-i", 20, 20),
        ])
    }

    #[test]
    fn test_frequency_and_classes_come_from_reference() {
        let merged = reference().merge_into(vec![row("見る", "みる", "", 0, 99)]);
        assert_eq!(merged[0].frequency, 55);
        assert_eq!(merged[0].inflection_class, "v1");
    }

    #[test]
    fn test_declared_class_is_kept() {
        let merged = reference().merge_into(vec![row("見る", "みる", "v5", 0, 99)]);
        assert_eq!(merged[0].inflection_class, "v5");
    }

    #[test]
    fn test_alternate_writings_are_added_once() {
        let merged = reference().merge_into(vec![
            row("見る", "みる", "", 0, 99),
            row("視る", "みる", "", 0, 98),
        ]);
        let terms: Vec<&str> = merged.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["見る", "視る", "観る"]);
        let alternate = &merged[2];
        assert_eq!(alternate.reading, "みる");
        assert_eq!(alternate.frequency, 55);
        assert_eq!(alternate.sequence, 99);
    }

    #[test]
    fn test_empty_reading_uses_first_group() {
        let merged = reference().merge_into(vec![row("高い", "", "", 0, 1)]);
        assert_eq!(merged[0].frequency, 20);
        assert_eq!(merged[0].inflection_class, "adj-i");
    }

    #[test]
    fn test_unmatched_entry_is_untouched() {
        let source = row("猫", "ねこ", "", 7, 1);
        let merged = reference().merge_into(vec![source.clone()]);
        assert_eq!(merged, vec![source]);
    }
}

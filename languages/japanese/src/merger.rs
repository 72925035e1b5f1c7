use std::collections::HashMap;

use yomikindle_core::types::KindleEntry;

/// Combine entries whose rendered bodies are identical, then order by
/// descending frequency. Equal frequencies keep their relative order.
pub fn merge_entries(entries: Vec<KindleEntry>) -> Vec<KindleEntry> {
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<KindleEntry> = Vec::new();

    for entry in entries {
        match group_index.get(&entry.body) {
            Some(&index) => absorb(&mut merged[index], entry),
            None => {
                group_index.insert(entry.body.clone(), merged.len());
                merged.push(entry);
            }
        }
    }

    // stable
    merged.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    merged
}

/// Fold `other` into `target`; body and bold flag stay those of `target`
fn absorb(target: &mut KindleEntry, other: KindleEntry) {
    for headword in other.headwords {
        if !target.headwords.contains(&headword) {
            target.headwords.push(headword);
        }
    }

    for datum in other.search_data {
        match target
            .search_data
            .iter_mut()
            .find(|known| known.base_form == datum.base_form)
        {
            Some(known) => known.absorb(datum.inflections),
            None => target.search_data.push(datum),
        }
    }

    target.frequency = target.frequency.max(other.frequency);
}

#[cfg(test)]
mod tests {
    use yomikindle_core::types::{InflectionRecord, SearchDatum};

    use super::*;

    fn entry(headword: &str, body: &str, frequency: i64) -> KindleEntry {
        KindleEntry {
            headwords: vec![headword.to_string()],
            bold_headword: true,
            search_data: vec![SearchDatum::new(headword)],
            body: body.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_identical_bodies_merge() {
        let mut first = entry("見る", "<b>みる</b>", 5);
        first.headwords.push("視る".into());
        let mut second = entry("観る", "<b>みる</b>", 12);
        second.headwords.push("見る".into());
        second.bold_headword = false;

        let merged = merge_entries(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].frequency, 12);
        assert_eq!(merged[0].headwords, vec!["見る", "視る", "観る"]);
        assert!(merged[0].bold_headword);
        let bases: Vec<&str> = merged[0].search_data.iter().map(|d| d.base_form.as_str()).collect();
        assert_eq!(bases, vec!["見る", "観る"]);
    }

    #[test]
    fn test_shared_base_form_unions_inflections() {
        let mut first = entry("見る", "x", 1);
        first.search_data[0].inflections = vec![InflectionRecord::new("命令形", "見ろ")];
        let mut second = entry("見る", "x", 1);
        second.search_data[0].inflections = vec![
            InflectionRecord::new("other", "見ろ"),
            InflectionRecord::new("仮定形", "見れ"),
        ];

        let merged = merge_entries(vec![first, second]);
        let inflections = &merged[0].search_data[0].inflections;
        assert_eq!(inflections.len(), 2);
        assert_eq!(inflections[0].rule_name, "命令形");
        assert_eq!(inflections[1].surface_form, "見れ");
    }

    #[test]
    fn test_sorted_by_frequency_descending_and_stable() {
        let merged = merge_entries(vec![
            entry("a", "1", 1),
            entry("b", "2", 7),
            entry("c", "3", 1),
            entry("d", "4", 7),
        ]);
        let order: Vec<&str> = merged.iter().map(|e| e.headwords[0].as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_different_bodies_stay_apart() {
        let merged = merge_entries(vec![entry("a", "x", 1), entry("a", "y", 1)]);
        assert_eq!(merged.len(), 2);
    }
}

use std::collections::HashSet;

use yomikindle_core::language::{InflectionClass, Inflector};
use yomikindle_core::types::InflectionRecord;

use crate::kana::{Dan, convert_to_dan};

const IRREALIS: &str = "未然形";
const CONTINUATIVE: &str = "連用形";
const IRREALIS_CONTINUATIVE: &str = "未然形・連用形";
const TERMINAL_ATTRIBUTIVE: &str = "終止形・連体形";
const HYPOTHETICAL: &str = "仮定形";
const IMPERATIVE: &str = "命令形";
const HYPOTHETICAL_IMPERATIVE: &str = "仮定形・命令形";
const EUPHONIC: &str = "音便形";
const TE_FORM: &str = "て形";
const STEM: &str = "語幹";

/// Final morae a godan verb can end in
const GODAN_ENDINGS: [char; 13] = [
    'う', 'く', 'す', 'つ', 'ぬ', 'ふ', 'む', 'る', 'ぐ', 'ず', 'づ', 'ぶ', 'ぷ',
];

/// 行く and its spellings take っ instead of い before て/た
const IKU_VERBS: [&str; 5] = ["行く", "いく", "ゆく", "逝く", "往く"];

/// Forms derived by swapping a fixed suffix for each replacement
struct Paradigm {
    suffixes: &'static [&'static str],
    rules: &'static [(&'static str, &'static str)],
}

impl Paradigm {
    fn apply(&self, word: &str, out: &mut Vec<InflectionRecord>) {
        let Some(stem) = self
            .suffixes
            .iter()
            .find_map(|suffix| word.strip_suffix(suffix))
        else {
            return;
        };
        for (rule_name, replacement) in self.rules {
            out.push(InflectionRecord::new(*rule_name, format!("{stem}{replacement}")));
        }
    }
}

const ICHIDAN: Paradigm = Paradigm {
    suffixes: &["る"],
    rules: &[
        (IRREALIS_CONTINUATIVE, ""),
        (HYPOTHETICAL, "れ"),
        (IMPERATIVE, "ろ"),
        (IMPERATIVE, "よ"),
    ],
};

const KURU_KANJI: Paradigm = Paradigm {
    suffixes: &["来る"],
    rules: &[
        (IRREALIS_CONTINUATIVE, "来"),
        (HYPOTHETICAL, "来れ"),
        (IMPERATIVE, "来い"),
        (TE_FORM, "来て"),
    ],
};

const KURU_KANA: Paradigm = Paradigm {
    suffixes: &["くる"],
    rules: &[
        (IRREALIS, "こ"),
        (CONTINUATIVE, "き"),
        (HYPOTHETICAL, "くれ"),
        (IMPERATIVE, "こい"),
        (TE_FORM, "きて"),
    ],
};

const SURU: Paradigm = Paradigm {
    suffixes: &["する"],
    rules: &[
        (IRREALIS_CONTINUATIVE, "し"),
        (IRREALIS, "せ"),
        (IRREALIS, "さ"),
        (TERMINAL_ATTRIBUTIVE, "す"),
        (HYPOTHETICAL, "すれ"),
        (IMPERATIVE, "しろ"),
        (IMPERATIVE, "せよ"),
        (TE_FORM, "して"),
    ],
};

const ZURU: Paradigm = Paradigm {
    suffixes: &["じる", "ずる"],
    rules: &[
        (IRREALIS_CONTINUATIVE, "じ"),
        (IRREALIS, "ぜ"),
        (IRREALIS, "ざ"),
        (TERMINAL_ATTRIBUTIVE, "ずる"),
        (TERMINAL_ATTRIBUTIVE, "じる"),
        (TERMINAL_ATTRIBUTIVE, "ず"),
        (HYPOTHETICAL, "ずれ"),
        (HYPOTHETICAL, "じれ"),
        (IMPERATIVE, "じろ"),
        (IMPERATIVE, "ぜよ"),
        (IMPERATIVE, "じよ"),
    ],
};

const I_ADJECTIVE: Paradigm = Paradigm {
    suffixes: &["い"],
    rules: &[
        (IRREALIS, "かろ"),
        (CONTINUATIVE, "かっ"),
        (CONTINUATIVE, "く"),
        (HYPOTHETICAL, "けれ"),
        // bare stem, registers the modern headword of entries written with し/しい
        (STEM, ""),
    ],
};

/// Generates the conjugated surface forms Kindle needs to match a headword
#[derive(Debug, Default, Clone, Copy)]
pub struct JapaneseInflector;

impl JapaneseInflector {
    pub fn new() -> Self {
        Self
    }

    /// Godan forms from shifting the final mora across the vowel columns
    fn godan_forms(&self, term: &str, original_term: &str, out: &mut Vec<InflectionRecord>) {
        let Some(last) = term.chars().last() else {
            return;
        };
        if !GODAN_ENDINGS.contains(&last) {
            return;
        }
        let stem = &term[..term.len() - last.len_utf8()];
        let mora = last.to_string();

        if let Some(kana) = convert_to_dan(&mora, Dan::I) {
            out.push(InflectionRecord::new(CONTINUATIVE, format!("{stem}{kana}")));
        }

        // Kept next to the plain い-column form, which stays even where the
        // euphonic one is the correct stem
        if let Some(kana) = Self::euphonic_ending(last, original_term) {
            out.push(InflectionRecord::new(EUPHONIC, format!("{stem}{kana}")));
        }

        for (rule_name, dan) in [
            (IRREALIS, Dan::A),
            (IRREALIS, Dan::O),
            (HYPOTHETICAL_IMPERATIVE, Dan::E),
        ] {
            if let Some(kana) = convert_to_dan(&mora, dan) {
                out.push(InflectionRecord::new(rule_name, format!("{stem}{kana}")));
            }
        }
    }

    /// Final mora of the stem used before て/た
    fn euphonic_ending(last: char, original_term: &str) -> Option<char> {
        if IKU_VERBS.iter().any(|verb| original_term.ends_with(verb)) {
            return Some('っ');
        }
        match last {
            'く' | 'ぐ' => Some('い'),
            'う' | 'つ' | 'る' => Some('っ'),
            'ぬ' | 'ぶ' | 'む' => Some('ん'),
            _ => None,
        }
    }
}

impl Inflector for JapaneseInflector {
    fn inflect(&self, term: &str, classes: &str, original_term: &str) -> Vec<InflectionRecord> {
        let mut records = Vec::new();

        for class in InflectionClass::parse_list(classes) {
            match class {
                InflectionClass::Godan => self.godan_forms(term, original_term, &mut records),
                InflectionClass::Ichidan => ICHIDAN.apply(term, &mut records),
                InflectionClass::Kuru => {
                    KURU_KANJI.apply(term, &mut records);
                    KURU_KANA.apply(term, &mut records);
                }
                InflectionClass::Suru => SURU.apply(term, &mut records),
                InflectionClass::Zuru => ZURU.apply(term, &mut records),
                InflectionClass::IAdjective => I_ADJECTIVE.apply(term, &mut records),
            }
        }

        // じる and ずる spellings are interchangeable whatever the declared class
        ZURU.apply(term, &mut records);

        let mut seen = HashSet::new();
        records.retain(|record| {
            !record.surface_form.is_empty()
                && record.surface_form != term
                && seen.insert(record.surface_form.clone())
        });
        records
    }
}

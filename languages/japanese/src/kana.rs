//! Character-level kana helpers.

const KATAKANA_START: char = '\u{30A1}';
const KATAKANA_END: char = '\u{30F6}';
const HIRAGANA_START: char = '\u{3041}';
const HIRAGANA_END: char = '\u{3096}';
const KANA_SHIFT: u32 = 0x60;

/// Iteration mark substituted for a repeated kanji
pub const ITERATION_MARK: char = '々';

/// Consonant rows of the syllabary, vowels in a/i/u/e/o order
const DAN_TABLE: [[char; 5]; 15] = [
    ['あ', 'い', 'う', 'え', 'お'],
    ['か', 'き', 'く', 'け', 'こ'],
    ['さ', 'し', 'す', 'せ', 'そ'],
    ['た', 'ち', 'つ', 'て', 'と'],
    ['な', 'に', 'ぬ', 'ね', 'の'],
    ['は', 'ひ', 'ふ', 'へ', 'ほ'],
    ['ま', 'み', 'む', 'め', 'も'],
    ['や', 'い', 'ゆ', 'え', 'よ'],
    ['ら', 'り', 'る', 'れ', 'ろ'],
    ['わ', 'い', 'う', 'え', 'を'],
    ['が', 'ぎ', 'ぐ', 'げ', 'ご'],
    ['ざ', 'じ', 'ず', 'ぜ', 'ぞ'],
    ['だ', 'ぢ', 'づ', 'で', 'ど'],
    ['ば', 'び', 'ぶ', 'べ', 'ぼ'],
    ['ぱ', 'ぴ', 'ぷ', 'ぺ', 'ぽ'],
];

/// Vowel column of the syllabary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dan {
    A,
    I,
    U,
    E,
    O,
}

impl Dan {
    pub const ALL: [Dan; 5] = [Dan::A, Dan::I, Dan::U, Dan::E, Dan::O];

    fn column(self) -> usize {
        match self {
            Dan::A => 0,
            Dan::I => 1,
            Dan::U => 2,
            Dan::E => 3,
            Dan::O => 4,
        }
    }
}

pub fn to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| shift_if(c, KATAKANA_START..=KATAKANA_END, |code| code - KANA_SHIFT))
        .collect()
}

pub fn to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| shift_if(c, HIRAGANA_START..=HIRAGANA_END, |code| code + KANA_SHIFT))
        .collect()
}

fn shift_if(c: char, range: std::ops::RangeInclusive<char>, shift: impl Fn(u32) -> u32) -> char {
    if range.contains(&c) {
        char::from_u32(shift(c as u32)).unwrap_or(c)
    } else {
        c
    }
}

/// Move a single kana to another vowel column of its row.
///
/// Returns `None` when `mora` is not exactly one character or belongs to no row.
/// Characters shared by several rows (い, う, え) resolve to the first row.
pub fn convert_to_dan(mora: &str, dan: Dan) -> Option<char> {
    let mut chars = mora.chars();
    let kana = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    DAN_TABLE
        .iter()
        .find(|row| row.contains(&kana))
        .map(|row| row[dan.column()])
}

/// CJK unified ideograph, including the extension blocks
pub fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{2A700}'..='\u{2EBEF}'
        | '\u{30000}'..='\u{3134F}')
}

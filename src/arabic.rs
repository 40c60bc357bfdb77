//! Arabic chapter-name normalization and answer matching.
//!
//! Chapter names reach us in several spellings: the content API sends the Uthmani
//! form with full tashkeel and the "سُورَةُ" prefix, the catalog holds plain
//! spellings, and options carry a plain "سورة" prefix. `normalize` maps all of
//! them onto one representative string so equality is the only check we need.
//!
//! Example:
//!   in:  "سُورَةُ ٱلْفَاتِحَةِ"
//!   out: "الفاتحة"
use unicode_normalization::UnicodeNormalization;

/// Honorific prefix placed in front of every displayed option.
pub const CHAPTER_PREFIX: &str = "سورة";

const TATWEEL: char = '\u{0640}';
const ALIF: char = '\u{0627}';
const YA: char = '\u{064A}';
const ALIF_MAKSURA: char = '\u{0649}';
const HA: char = '\u{0647}';
const TA_MARBUTA: char = '\u{0629}';

/// Canonical form of `text` for chapter-name comparison.
///
/// Pure and total: unknown characters pass through, empty input gives "".
/// Applying it twice yields the same string as applying it once.
pub fn normalize(text: &str) -> String {
    let folded = collapse_whitespace(&fold(text));
    strip_prefix_tokens(&folded).to_string()
}

/// True when both strings denote the same chapter.
pub fn matches(candidate: &str, reference: &str) -> bool {
    normalize(candidate) == normalize(reference)
}

/// "سورة {name}" as shown on option buttons.
pub fn with_prefix(prefix: &str, name: &str) -> String {
    format!("{} {}", prefix, name)
}

/// Combining marks that carry pronunciation only: Quranic signs, harakat,
/// hamza above/below, superscript alif and the small Uthmani annotation marks.
fn is_arabic_mark(ch: char) -> bool {
    matches!(ch,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}')
}

fn fold_letter(ch: char) -> char {
    match ch {
        '\u{0671}' | '\u{0625}' | '\u{0623}' | '\u{0622}' => ALIF,
        ALIF_MAKSURA => YA,
        other => other,
    }
}

/// Compatibility decomposition, mark and tatweel removal, letter folding, then
/// canonical recomposition. Hamza and madda seats decompose into a bare letter
/// plus a mark, so "أ" and "ئ" lose the mark here. Recomposing only after the
/// filter keeps the result stable under a second pass.
///
/// Whitespace is kept as-is so word boundaries survive for the ta-marbuta rule.
fn fold(text: &str) -> String {
    let letters: Vec<char> = text
        .nfkd()
        .filter(|c| !is_arabic_mark(*c) && *c != TATWEEL)
        .map(fold_letter)
        .nfc()
        .collect();

    let mut out = String::with_capacity(text.len());
    for (i, ch) in letters.iter().enumerate() {
        let word_final = letters.get(i + 1).map_or(true, |next| next.is_whitespace());
        if *ch == HA && word_final {
            out.push(TA_MARBUTA);
        } else {
            out.push(*ch);
        }
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop every leading "سورة" token from folded, single-spaced text, provided
/// another word follows it. Any spelling of the prefix (tashkeel, tatweel,
/// final ha) has already been folded onto `CHAPTER_PREFIX`, and tokens made only
/// of marks are gone, so one pass leaves nothing for a second one to strip.
fn strip_prefix_tokens(folded: &str) -> &str {
    let mut rest = folded;
    while let Some((token, tail)) = rest.split_once(' ') {
        if token != CHAPTER_PREFIX {
            break;
        }
        rest = tail;
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn api_spelling_matches_catalog_spelling() {
        assert_eq!(normalize("سُورَةُ ٱلْفَاتِحَةِ"), "الفاتحة");
        assert!(matches("سُورَةُ ٱلْفَاتِحَةِ", "الفاتحة"));
        assert!(matches("سورة البقرة", "سُورَةُ البَقَرَةِ"));
    }

    #[test]
    fn prefix_is_ignored() {
        for name in ["الكهف", "آل عمران", "يس", "ق"] {
            assert_eq!(normalize(&format!("سورة {name}")), normalize(name));
            assert_eq!(normalize(&format!("سُورَةُ   {name}")), normalize(name));
        }
    }

    #[test]
    fn bare_prefix_without_following_word_is_kept() {
        assert_eq!(normalize("سورة"), "سورة");
    }

    #[test]
    fn diacritics_and_uthmani_marks_are_ignored() {
        assert_eq!(normalize("التَّوۡبَةِ"), normalize("التوبة"));
        assert_eq!(normalize("الرَّحۡمَٰنِ"), normalize("الرحمن"));
        assert_eq!(normalize("مَرۡيَمَ"), "مريم");
    }

    #[test]
    fn alif_variants_fold_together() {
        let variants = ["الإسراء", "الأسراء", "الآسراء", "الاسراء", "الٱسراء"];
        let expected = normalize(variants[0]);
        for v in variants {
            assert_eq!(normalize(v), expected, "variant {v}");
        }
    }

    #[test]
    fn alif_maksura_folds_to_ya() {
        assert_eq!(normalize("الضحى"), "الضحي");
        assert!(matches("الأعلى", "الاعلي"));
    }

    #[test]
    fn final_ha_and_ta_marbuta_collapse_to_ta_marbuta() {
        assert_eq!(normalize("البقره"), "البقرة");
        assert_eq!(normalize("البقرة"), "البقرة");
        assert_eq!(normalize("طه"), "طة");
        // only word-final ha is touched
        assert_eq!(normalize("الهمزة"), "الهمزة");
    }

    #[test]
    fn whitespace_and_tatweel() {
        assert_eq!(normalize("  آل \t\n عمـــران  "), "ال عمران");
        assert_eq!(normalize("ال ـ عمران"), "ال عمران");
    }

    #[test]
    fn empty_and_foreign_text() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert!(matches("", ""));
        assert!(!matches("", "الفاتحة"));
        assert_eq!(normalize("Al-Fatiha 1"), "Al-Fatiha 1");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "سُورَةُ ٱلْفَاتِحَةِ",
            "سورة سورة الناس",
            "سورة ـ سورة الفاتحة",
            "سورة \u{064E} سورة الفاتحة",
            "سورة",
            "طه",
            "البقره",
            "ال ـ عمران",
            "ﺍﻟﻔﻠﻖ",
            "  mixed ٱلْعَلَقِ text ",
            "e\u{0610}\u{0301}",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn mark_only_token_between_prefixes_is_dropped() {
        assert_eq!(normalize("سورة ـ سورة الفاتحة"), "الفاتحة");
        assert_eq!(normalize("سُورَةُ \u{064E} سورة الفاتحة"), "الفاتحة");
        assert_eq!(normalize("سورة ـ"), "سورة");
    }

    #[test]
    fn hamza_seats_fold_to_bare_letters() {
        assert_eq!(normalize("ي\u{0654}"), normalize("ي"));
        assert_eq!(normalize("ئ"), "ي");
        assert_eq!(normalize("ؤ"), "و");
    }

    /// Pieces random inputs are built from: prefix spellings, letters the folds
    /// touch, tatweel, mixed whitespace and a little Latin text.
    const PIECES: &[&str] = &[
        "سورة", "سُورَةُ", "سوره", "سـورة",
        "ا", "أ", "إ", "آ", "ٱ", "ى", "ي", "ئ", "ؤ", "ه", "ة", "ل", "ف", "ت", "ح", "ن", "س", "ر", "و",
        "\u{0640}", " ", "  ", "\t", "\n", "\u{00A0}",
        "e", "\u{0301}", "ﺍ", "ﻟ",
    ];

    /// One or two marks from every removed range.
    const MARKS: &[char] = &[
        '\u{0610}', '\u{061A}', '\u{064B}', '\u{064E}', '\u{0651}', '\u{0653}', '\u{0654}', '\u{0655}',
        '\u{065F}', '\u{0670}', '\u{06D6}', '\u{06DC}', '\u{06DF}', '\u{06E4}', '\u{06E7}', '\u{06E8}',
        '\u{06EA}', '\u{06ED}',
    ];

    fn random_text(rng: &mut StdRng, pieces: &[&str]) -> String {
        let len = rng.gen_range(0..12);
        (0..len).map(|_| pieces[rng.gen_range(0..pieces.len())]).collect()
    }

    fn insert_marks(text: &str, rng: &mut StdRng) -> String {
        let mut out = String::new();
        if rng.gen_bool(0.3) {
            out.push(MARKS[rng.gen_range(0..MARKS.len())]);
        }
        for ch in text.chars() {
            out.push(ch);
            for _ in 0..rng.gen_range(0..3) {
                out.push(MARKS[rng.gen_range(0..MARKS.len())]);
            }
        }
        out
    }

    #[test]
    fn idempotent_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mark_strings: Vec<String> = MARKS.iter().map(|m| m.to_string()).collect();
        let mut with_marks: Vec<&str> = PIECES.to_vec();
        with_marks.extend(mark_strings.iter().map(String::as_str));

        for _ in 0..5000 {
            let s = random_text(&mut rng, &with_marks);
            let once = normalize(&s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn marks_never_change_the_result() {
        let mut rng = StdRng::seed_from_u64(20);
        for _ in 0..5000 {
            let plain = random_text(&mut rng, PIECES);
            let marked = insert_marks(&plain, &mut rng);
            assert_eq!(normalize(&marked), normalize(&plain), "plain {plain:?} marked {marked:?}");
        }
    }

    #[test]
    fn matcher_is_symmetric() {
        let pairs = [
            ("سورة الفاتحة", "الفاتحة"),
            ("الناس", "الفلق"),
            ("", "ق"),
            ("الأعلى", "سُورَةُ الأَعۡلَىٰ"),
        ];
        for (a, b) in pairs {
            assert_eq!(matches(a, b), matches(b, a));
        }
    }

    #[test]
    fn prefix_helper() {
        assert_eq!(with_prefix(CHAPTER_PREFIX, "الفاتحة"), "سورة الفاتحة");
    }
}

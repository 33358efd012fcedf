use super::{Dex, ReferenceEntity};

pub const SUGGESTION_LIMIT: usize = 5;

const HIRAGANA_START: char = '\u{3041}'; // ぁ
const HIRAGANA_END: char = '\u{3093}'; // ん
const KATAKANA_OFFSET: u32 = 0x60;

/// Shift every hiragana in ぁ..=ん onto its katakana counterpart. Anything else
/// passes through untouched.
pub fn to_katakana(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if (HIRAGANA_START..=HIRAGANA_END).contains(&c) {
                char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Autocomplete candidates for a partially typed name.
///
/// Returns the first [`SUGGESTION_LIMIT`] entries, in dataset order, whose name
/// contains either the raw input or its katakana form.
pub fn suggest<'a>(dex: &'a Dex, partial: &str) -> Vec<&'a ReferenceEntity> {
    if partial.is_empty() {
        return Vec::new();
    }

    let katakana = to_katakana(partial);
    dex.entries()
        .iter()
        .filter(|e| e.name.contains(katakana.as_str()) || e.name.contains(partial))
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(entities: &[&'a ReferenceEntity]) -> Vec<&'a str> {
        entities.iter().map(|e| e.name.as_str()).collect()
    }

    fn small_dex() -> Dex {
        Dex::from_json_str(
            r#"[
                {"名前": "ピカチュウ"},
                {"名前": "ライチュウ"},
                {"名前": "ピチュー"},
                {"名前": "チュウチュウ"},
                {"名前": "ミチュウ"},
                {"名前": "マチュウ"},
                {"名前": "Chu"},
                {"名前": "ヤチュウ"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn katakana_shift() {
        assert_eq!(to_katakana("ぴかちゅう"), "ピカチュウ");
        assert_eq!(to_katakana("ぁ"), "ァ");
        assert_eq!(to_katakana("ん"), "ン");
        assert_eq!(to_katakana("ピカ"), "ピカ");
        assert_eq!(to_katakana("pika 1"), "pika 1");
        assert_eq!(to_katakana("ぴカchu"), "ピカchu");
        assert_eq!(to_katakana(""), "");
    }

    #[test]
    fn empty_input_gives_nothing() {
        let dex = small_dex();
        assert!(suggest(&dex, "").is_empty());
    }

    #[test]
    fn hiragana_input_finds_katakana_name() {
        let dex = small_dex();
        assert_eq!(names(&suggest(&dex, "ぴか")), vec!["ピカチュウ"]);
    }

    #[test]
    fn raw_input_still_matches() {
        let dex = small_dex();
        assert_eq!(names(&suggest(&dex, "Chu")), vec!["Chu"]);
        assert_eq!(names(&suggest(&dex, "ピチ")), vec!["ピチュー"]);
    }

    #[test]
    fn caps_at_limit_in_dataset_order() {
        let dex = small_dex();
        let hits = suggest(&dex, "ちゅう");
        assert_eq!(
            names(&hits),
            vec!["ピカチュウ", "ライチュウ", "チュウチュウ", "ミチュウ", "マチュウ"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let dex = small_dex();
        assert!(suggest(&dex, "ぜんぜん").is_empty());
    }

    #[test]
    fn bundled_results_respect_contract() {
        let dex = Dex::global().unwrap();
        for input in ["ど", "ド", "ら", "ア", "ー", "ぴか", "ガ"] {
            let katakana = to_katakana(input);
            let hits = suggest(dex, input);
            assert!(hits.len() <= SUGGESTION_LIMIT);
            assert!(hits
                .iter()
                .all(|e| e.name.contains(input) || e.name.contains(katakana.as_str())));

            let expected: Vec<&str> = dex
                .entries()
                .iter()
                .filter(|e| e.name.contains(input) || e.name.contains(katakana.as_str()))
                .take(SUGGESTION_LIMIT)
                .map(|e| e.name.as_str())
                .collect();
            assert_eq!(names(&hits), expected);
            assert_eq!(names(&suggest(dex, input)), expected);
        }
    }

    #[test]
    fn bundled_pikachu_from_hiragana() {
        let dex = Dex::global().unwrap();
        let hits = suggest(dex, "ぴかちゅ");
        assert_eq!(names(&hits), vec!["ピカチュウ"]);
    }
}

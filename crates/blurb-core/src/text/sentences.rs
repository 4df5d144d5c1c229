//! Language-aware sentence splitting.
//!
//! A sentence ends at `.`, `!`, `?` or `…` (runs like `?!` stay together),
//! optionally followed by closing quotes or brackets, when the next
//! non-space character can start a sentence. Known abbreviations and
//! uppercase initials do not end a sentence; units after a number do. A line
//! break after terminal punctuation, or a blank line, always ends one.

use serde::{Deserialize, Serialize};

/// Language whose abbreviation list is used for splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceLanguage {
    #[default]
    Polish,
    English,
}

/// Polish abbreviations that end with a period but do not end a sentence.
/// Units (cm, kg, zł) are written without a period in Polish, so they are
/// absent on purpose.
const POLISH_ABBREVIATIONS: &[&str] = &[
    "np.", "tj.", "tzn.", "tzw.", "itd.", "itp.", "m.in.", "ok.", "ul.", "al.", "pl.", "prof.",
    "dr.", "mgr.", "inż.", "św.", "wg.", "zob.", "por.", "godz.", "tys.", "mln.", "mld.", "nr.",
    "str.", "ds.", "im.", "jw.", "j.w.", "cd.", "tel.", "min.", "maks.", "szt.", "poj.", "wym.",
    "dł.", "szer.", "wys.", "gł.", "ww.", "n.e.", "p.n.e.", "b.r.", "ang.", "łac.",
];

/// English abbreviations that end with a period but do not end a sentence.
const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "e.g.", "i.e.",
    "approx.", "inc.", "ltd.", "co.", "no.", "vol.", "fig.", "dept.", "est.", "avg.", "max.",
    "min.",
];

impl SentenceLanguage {
    fn abbreviations(&self) -> &'static [&'static str] {
        match self {
            SentenceLanguage::Polish => POLISH_ABBREVIATIONS,
            SentenceLanguage::English => ENGLISH_ABBREVIATIONS,
        }
    }
}

impl std::fmt::Display for SentenceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentenceLanguage::Polish => write!(f, "polish"),
            SentenceLanguage::English => write!(f, "english"),
        }
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '»' | '«')
}

fn is_opening(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '„' | '“' | '‘' | '«' | '»')
}

fn can_start_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || is_opening(c)
}

/// Splits text into trimmed, non-empty sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter {
    language: SentenceLanguage,
}

impl SentenceSplitter {
    pub fn new(language: SentenceLanguage) -> Self {
        Self { language }
    }

    /// Split `text` into sentences, borrowing from the input.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let offset = |idx: usize| chars.get(idx).map_or(text.len(), |&(pos, _)| pos);

        let mut sentences = Vec::new();
        let mut push = |s: &'a str| {
            let s = s.trim();
            if !s.is_empty() {
                sentences.push(s);
            }
        };

        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                let mut k = i + 1;
                let mut blank_line = false;
                while k < chars.len() && chars[k].1.is_whitespace() {
                    blank_line |= chars[k].1 == '\n';
                    k += 1;
                }
                if blank_line {
                    push(&text[start..pos]);
                    start = offset(k);
                }
                i = k;
                continue;
            }

            if !is_terminal(c) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j < chars.len() && is_terminal(chars[j].1) {
                j += 1;
            }
            let single_period = c == '.' && j == i + 1;
            while j < chars.len() && is_closing(chars[j].1) {
                j += 1;
            }
            let end = offset(j);

            if j == chars.len() || !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }

            let mut k = j;
            let mut newline = false;
            while k < chars.len() && chars[k].1.is_whitespace() {
                newline |= chars[k].1 == '\n';
                k += 1;
            }
            if k == chars.len() {
                i = k;
                continue;
            }

            let abbreviated = single_period && self.ends_with_abbreviation(&text[start..end]);
            if newline || (!abbreviated && can_start_sentence(chars[k].1)) {
                push(&text[start..end]);
                start = offset(k);
            }
            i = k;
        }

        push(&text[start..]);
        sentences
    }

    /// Whether the last word of `segment` (ending in a period) is an
    /// abbreviation or an initial.
    ///
    /// A word right after a number is a unit (`2 m.`, `30 min.`) and may end
    /// the sentence. A single uppercase letter is an initial only at the start
    /// of the segment or after a capitalised word (`J. Kowalski`, not `typu C.`).
    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        let mut words = segment
            .split_whitespace()
            .rev()
            .map(|w| w.trim_start_matches(is_opening));
        let word = words.next().unwrap_or_default();
        let Some(stem) = word.strip_suffix('.') else {
            return false;
        };
        let previous = words.next();

        if previous.is_some_and(|p| p.starts_with(|c: char| c.is_ascii_digit())) {
            return false;
        }

        let mut stem_chars = stem.chars();
        if let (Some(first), None) = (stem_chars.next(), stem_chars.next()) {
            return first.is_uppercase()
                && previous.map_or(true, |p| p.starts_with(char::is_uppercase));
        }

        let lower = word.to_lowercase();
        self.language.abbreviations().iter().any(|abbr| *abbr == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_pl(text: &str) -> Vec<&str> {
        SentenceSplitter::new(SentenceLanguage::Polish).split(text)
    }

    #[test]
    fn test_basic_split() {
        let text = "Mysz jest wygodna. Działa bez kabla! Czy warto? Tak.";
        assert_eq!(
            split_pl(text),
            vec!["Mysz jest wygodna.", "Działa bez kabla!", "Czy warto?", "Tak."]
        );
    }

    #[test]
    fn test_polish_abbreviations_do_not_split() {
        let text = "Pasuje do wielu urządzeń, np. Laptopów i tabletów. Zawiera m.in. Baterię.";
        assert_eq!(
            split_pl(text),
            vec![
                "Pasuje do wielu urządzeń, np. Laptopów i tabletów.",
                "Zawiera m.in. Baterię."
            ]
        );
    }

    #[test]
    fn test_abbreviation_is_case_insensitive() {
        let text = "Zaprojektował go Prof. Nowak. Działa świetnie.";
        assert_eq!(split_pl(text).len(), 2);
    }

    #[test]
    fn test_initials_do_not_split() {
        let text = "Autor J. Kowalski poleca ten model. Jest lekki.";
        assert_eq!(
            split_pl(text),
            vec!["Autor J. Kowalski poleca ten model.", "Jest lekki."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let text = "Waży 1.5 kg i ma 3.2 cm grubości. Kolor czarny.";
        assert_eq!(split_pl(text).len(), 2);
    }

    #[test]
    fn test_unit_at_sentence_end_splits() {
        let text = "Długość kabla to 20 cm. Produkt jest lekki.";
        assert_eq!(
            split_pl(text),
            vec!["Długość kabla to 20 cm.", "Produkt jest lekki."]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(split_pl("To jest test. a potem dalej."), vec!["To jest test. a potem dalej."]);
    }

    #[test]
    fn test_punctuation_runs_stay_together() {
        assert_eq!(
            split_pl("Naprawdę?! Tak... Oczywiście."),
            vec!["Naprawdę?!", "Tak...", "Oczywiście."]
        );
    }

    #[test]
    fn test_closing_quote_belongs_to_sentence() {
        assert_eq!(
            split_pl("Nazwa to \"Mysz Pro.\" Kolejne zdanie."),
            vec!["Nazwa to \"Mysz Pro.\"", "Kolejne zdanie."]
        );
    }

    #[test]
    fn test_opening_quote_starts_sentence() {
        assert_eq!(
            split_pl("Pierwsze zdanie. „Cytat” na początku."),
            vec!["Pierwsze zdanie.", "„Cytat” na początku."]
        );
    }

    #[test]
    fn test_digit_starts_sentence() {
        assert_eq!(split_pl("Zestaw zawiera kabel. 2 baterie w zestawie.").len(), 2);
    }

    #[test]
    fn test_newline_after_punctuation_splits() {
        assert_eq!(
            split_pl("Pierwsza linia.\nnastępna linia."),
            vec!["Pierwsza linia.", "następna linia."]
        );
    }

    #[test]
    fn test_blank_line_splits_without_punctuation() {
        assert_eq!(
            split_pl("Nagłówek\n\nTreść opisu."),
            vec!["Nagłówek", "Treść opisu."]
        );
    }

    #[test]
    fn test_single_newline_without_punctuation_joins() {
        assert_eq!(split_pl("Jedno zdanie\nciągnie się dalej."), vec!["Jedno zdanie\nciągnie się dalej."]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split_pl("").is_empty());
        assert!(split_pl("   \n\n  ").is_empty());
    }

    #[test]
    fn test_text_without_terminal_punctuation() {
        assert_eq!(split_pl("bez kropki na końcu"), vec!["bez kropki na końcu"]);
    }

    #[test]
    fn test_english_abbreviations() {
        let splitter = SentenceSplitter::new(SentenceLanguage::English);
        assert_eq!(
            splitter.split("Designed by Dr. Smith in the lab. It works, e.g. Offline."),
            vec!["Designed by Dr. Smith in the lab.", "It works, e.g. Offline."]
        );
    }

    #[test]
    fn test_polish_list_does_not_apply_to_english() {
        let splitter = SentenceSplitter::new(SentenceLanguage::English);
        assert_eq!(splitter.split("See np. Next one.").len(), 2);
    }

    #[test]
    fn test_product_copy_with_units_and_connector_types() {
        let text = "Mysz jest wygodna. Ma kabel długości 2 m. Działa bez sterowników. \
                    Port USB typu C. Waży mało. Kolor czarny. Zasięg 10 m. Gwarancja 2 lata.";
        assert_eq!(
            split_pl(text),
            vec![
                "Mysz jest wygodna.",
                "Ma kabel długości 2 m.",
                "Działa bez sterowników.",
                "Port USB typu C.",
                "Waży mało.",
                "Kolor czarny.",
                "Zasięg 10 m.",
                "Gwarancja 2 lata."
            ]
        );
    }

    #[test]
    fn test_single_letter_units_end_sentences() {
        assert_eq!(split_pl("Kabel ma długość 2 m. Działa od razu.").len(), 2);
        assert_eq!(split_pl("Pojemność to 5 l. Produkt jest szczelny.").len(), 2);
        assert_eq!(split_pl("Waga to 500 g. Produkt jest lekki.").len(), 2);
    }

    #[test]
    fn test_lowercase_single_letter_ends_sentence() {
        assert_eq!(split_pl("Wymiar oznaczono jako x. Kolejne zdanie.").len(), 2);
    }

    #[test]
    fn test_abbreviation_after_number_is_a_unit() {
        assert_eq!(
            split_pl("Ładowanie trwa 30 min. Bateria starcza na tydzień."),
            vec!["Ładowanie trwa 30 min.", "Bateria starcza na tydzień."]
        );
        assert_eq!(split_pl("Sprzedano 10 tys. Klienci są zadowoleni.").len(), 2);
        // Before a number it is still an abbreviation
        assert_eq!(split_pl("Wymaga min. 4 GB pamięci.").len(), 1);
    }

    #[test]
    fn test_chained_initials() {
        assert_eq!(
            split_pl("Autor J. R. Nowak napisał ją w rok. Książka jest gruba."),
            vec!["Autor J. R. Nowak napisał ją w rok.", "Książka jest gruba."]
        );
    }
}

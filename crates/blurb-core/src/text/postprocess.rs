//! Turns generated copy into a description plus fixed bullet slots.

use super::sentences::SentenceSplitter;
use crate::config::PostprocessConfig;
use crate::types::ResultRow;

/// Applies the sentence-count gate and fills the bullet slots.
#[derive(Debug, Clone)]
pub struct Postprocessor {
    splitter: SentenceSplitter,
    min_sentences: usize,
    description_sentences: usize,
    max_bullets: usize,
    no_data: String,
    null: String,
    vendor_tag: String,
}

impl Postprocessor {
    pub fn new(config: &PostprocessConfig) -> Self {
        Self {
            splitter: SentenceSplitter::new(config.language),
            min_sentences: config.min_sentences,
            description_sentences: config.description_sentences,
            max_bullets: config.max_bullets,
            no_data: config.no_data.clone(),
            null: config.null.clone(),
            vendor_tag: config.vendor_tag.clone(),
        }
    }

    /// Number of bullet columns every row carries.
    pub fn bullet_slots(&self) -> usize {
        self.max_bullets
    }

    /// Whether `row` got a real description rather than the "no data" sentinel.
    pub fn is_described(&self, row: &ResultRow) -> bool {
        row.description != self.no_data
    }

    /// Build the output row for one identifier and its completion text.
    ///
    /// Text with fewer than `min_sentences` sentences yields the "no data"
    /// description and only NULL slots. Otherwise the leading sentences form
    /// the description and the rest become bullets with trailing `.!?`
    /// removed.
    pub fn process(&self, identifier: &str, text: &str) -> ResultRow {
        let sentences = self.splitter.split(text);

        let (description, mut bullets) = if sentences.len() < self.min_sentences {
            tracing::debug!(
                "{identifier}: {} sentence(s), below {}; no description",
                sentences.len(),
                self.min_sentences
            );
            (self.no_data.clone(), Vec::with_capacity(self.max_bullets))
        } else {
            let split = self.description_sentences.min(sentences.len());
            let (head, tail) = sentences.split_at(split);
            let bullets: Vec<String> = tail
                .iter()
                .take(self.max_bullets)
                .map(|sentence| {
                    let bullet = sentence.trim_end_matches(['.', '!', '?']);
                    if bullet.is_empty() {
                        self.no_data.clone()
                    } else {
                        bullet.to_string()
                    }
                })
                .collect();
            (head.join(" "), bullets)
        };

        bullets.resize(self.max_bullets, self.null.clone());

        ResultRow {
            identifier: identifier.to_string(),
            vendor: self.vendor_tag.clone(),
            description,
            bullets,
        }
    }
}

impl Default for Postprocessor {
    fn default() -> Self {
        Self::new(&PostprocessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::SentenceLanguage;

    fn sentences(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Zdanie numer {i}."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_six_sentences_fill_three_bullets() {
        let row = Postprocessor::default().process("B001", &sentences(6));

        assert_eq!(
            row.description,
            "Zdanie numer 1. Zdanie numer 2. Zdanie numer 3."
        );
        assert_eq!(row.bullets.len(), 10);
        assert_eq!(
            &row.bullets[..3],
            &["Zdanie numer 4", "Zdanie numer 5", "Zdanie numer 6"]
        );
        assert!(row.bullets[3..].iter().all(|b| b == "NULL"));
    }

    #[test]
    fn test_fewer_than_six_sentences_yield_no_data() {
        let row = Postprocessor::default().process("B002", &sentences(5));

        assert_eq!(row.description, "no data");
        assert_eq!(row.bullets, vec!["NULL"; 10]);
        assert!(!Postprocessor::default().is_described(&row));
    }

    #[test]
    fn test_empty_completion_yields_no_data() {
        let row = Postprocessor::default().process("B003", "");
        assert_eq!(row.description, "no data");
        assert_eq!(row.bullets, vec!["NULL"; 10]);
    }

    #[test]
    fn test_trailing_punctuation_stripped_from_bullets() {
        let text = "Jeden. Dwa. Trzy. Cztery! Pięć?! Sześć... Siedem.";
        let row = Postprocessor::default().process("B004", text);

        assert_eq!(row.description, "Jeden. Dwa. Trzy.");
        assert_eq!(&row.bullets[..4], &["Cztery", "Pięć", "Sześć", "Siedem"]);
    }

    #[test]
    fn test_wireless_mouse_seven_sentences() {
        let text = "Mysz bezprzewodowa to wygodne rozwiązanie. \
                    Działa na jednej baterii przez wiele miesięcy. \
                    Pasuje do prawej i lewej dłoni. \
                    Cichy klik nie przeszkadza otoczeniu. \
                    Odbiornik USB mieści się w obudowie. \
                    Czujnik działa na większości powierzchni. \
                    Zasięg wynosi do 10 metrów.";
        let row = Postprocessor::default().process("B001", text);

        assert_eq!(row.identifier, "B001");
        assert_eq!(row.vendor, "AmazonPl/NM5V9");
        assert_eq!(
            row.description,
            "Mysz bezprzewodowa to wygodne rozwiązanie. \
             Działa na jednej baterii przez wiele miesięcy. \
             Pasuje do prawej i lewej dłoni."
        );
        assert_eq!(row.bullets[0], "Cichy klik nie przeszkadza otoczeniu");
        assert_eq!(row.bullets[3], "Zasięg wynosi do 10 metrów");
        assert!(row.bullets[..4].iter().all(|b| b != "NULL"));
        assert!(row.bullets[4..].iter().all(|b| b == "NULL"));
    }

    #[test]
    fn test_bullets_capped_at_max() {
        let row = Postprocessor::default().process("B005", &sentences(20));
        assert_eq!(row.bullets.len(), 10);
        assert_eq!(row.bullets[9], "Zdanie numer 13");
        assert!(row.bullets.iter().all(|b| b != "NULL"));
    }

    #[test]
    fn test_punctuation_only_bullet_becomes_no_data() {
        let text = format!("{}\n?!", sentences(5));
        let row = Postprocessor::default().process("B006", &text);

        assert_eq!(&row.bullets[..3], &["Zdanie numer 4", "Zdanie numer 5", "no data"]);
        assert_eq!(row.bullets[3], "NULL");
    }

    #[test]
    fn test_custom_sentinels_and_slots() {
        let config = PostprocessConfig {
            language: SentenceLanguage::English,
            min_sentences: 2,
            description_sentences: 1,
            max_bullets: 3,
            no_data: "n/a".to_string(),
            null: "-".to_string(),
            vendor_tag: "Vendor".to_string(),
        };
        let processor = Postprocessor::new(&config);
        assert_eq!(processor.bullet_slots(), 3);

        let row = processor.process("X1", "Made by Dr. Smith. Very light.");
        assert_eq!(row.description, "Made by Dr. Smith.");
        assert_eq!(row.bullets, vec!["Very light", "-", "-"]);
        assert_eq!(row.vendor, "Vendor");

        let row = processor.process("X2", "Only one.");
        assert_eq!(row.description, "n/a");
    }

    #[test]
    fn test_sentences_ending_in_units_are_counted() {
        let text = "Mysz jest wygodna. Ma kabel długości 2 m. Działa bez sterowników. \
                    Port USB typu C. Waży mało. Kolor czarny.";
        let row = Postprocessor::default().process("B007", text);

        assert_eq!(
            row.description,
            "Mysz jest wygodna. Ma kabel długości 2 m. Działa bez sterowników."
        );
        assert_eq!(&row.bullets[..3], &["Port USB typu C", "Waży mało", "Kolor czarny"]);
        assert!(Postprocessor::default().is_described(&row));
    }
}

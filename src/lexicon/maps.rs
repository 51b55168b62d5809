//! Static symbol and word tables
//!
//! These never change at runtime, so they live in `lazy_static!` blocks
//! next to the loaded lexicon rather than in resource files.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Currency symbols and codes that are not handled by the dedicated
    /// pound, dollar and rupee rules
    pub static ref CURRENCY_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("€", "euros");
        m.insert("¥", "yen");
        m.insert("₩", "won");
        m.insert("₽", "rubles");
        m.insert("₺", "lira");
        m.insert("₦", "naira");
        m.insert("₱", "pesos");
        m.insert("฿", "baht");
        m.insert("CHF", "swiss franc");
        m.insert("EUR", "euros");
        m.insert("JPY", "japanese yen");
        m.insert("GBP", "british pounds");
        m.insert("INR", "indian rupees");
        m.insert("CNY", "chinese yuan");
        m.insert("AUD", "australian dollars");
        m.insert("CAD", "canadian dollars");
        m
    };

    /// Math symbols and their spoken names
    pub static ref MATH_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("+", "plus");
        m.insert("=", "equals");
        m.insert("×", "times");
        m.insert("÷", "divided by");
        m.insert("±", "plus or minus");
        m.insert("<", "less than");
        m.insert(">", "greater than");
        m.insert("≤", "less than or equal to");
        m.insert("≥", "greater than or equal to");
        m.insert("≠", "not equal to");
        m.insert("≈", "approximately");
        m.insert("√", "square root of");
        m.insert("∞", "infinity");
        m.insert("π", "pi");
        m.insert("°", "degrees");
        m.insert("^", "to the power of");
        m
    };

    /// Shouted pronouns that must not be mistaken for abbreviations
    pub static ref PRONOUN_OVERRIDES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ME", "me");
        m.insert("MY", "my");
        m.insert("WE", "we");
        m.insert("HE", "he");
        m.insert("SHE", "she");
        m.insert("IT", "it");
        m.insert("THEY", "they");
        m.insert("THEM", "them");
        m.insert("YOU", "you");
        m.insert("HIM", "him");
        m.insert("HER", "her");
        m.insert("OUR", "our");
        m.insert("YOUR", "your");
        m.insert("THEIR", "their");
        m.insert("I'M", "I am");
        m
    };
}

/// Abbreviations that are always spelled letter by letter, whatever the
/// loaded tables say
pub const CURATED_INITIALISMS: &[&str] = &["IOC", "USD", "CEO", "DJ", "US", "RBI", "UTC"];

/// Dotted abbreviations expanded at sentence level, matched case-insensitively
pub const SENTENCE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("mrs", "misess"),
    ("mr", "mister"),
    ("ms", "miss"),
    ("dr", "doctor"),
    ("st", "saint"),
    ("co", "company"),
    ("jr", "junior"),
    ("maj", "major"),
    ("gen", "general"),
    ("drs", "doctors"),
    ("rev", "reverend"),
    ("lt", "lieutenant"),
    ("hon", "honorable"),
    ("sgt", "sergeant"),
    ("capt", "captain"),
    ("esq", "esquire"),
    ("ltd", "limited"),
    ("col", "colonel"),
    ("ft", "fort"),
    ("e.g", "for example"),
    ("i.e", "that is"),
    ("etc", "et cetera"),
    ("vs", "versus"),
];

/// Whether `word` is on the curated initialism list
pub fn is_curated_initialism(word: &str) -> bool {
    CURATED_INITIALISMS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_table() {
        assert_eq!(CURRENCY_SYMBOLS.get("CHF"), Some(&"swiss franc"));
        assert_eq!(CURRENCY_SYMBOLS.get("€"), Some(&"euros"));
        // Dedicated rules own these
        assert!(CURRENCY_SYMBOLS.get("$").is_none());
        assert!(CURRENCY_SYMBOLS.get("£").is_none());
        assert!(CURRENCY_SYMBOLS.get("₹").is_none());
    }

    #[test]
    fn test_curated_initialisms() {
        assert!(is_curated_initialism("CEO"));
        assert!(!is_curated_initialism("ceo"));
    }

    #[test]
    fn test_pronoun_overrides_skip_us() {
        // "US" is a curated initialism, not a pronoun
        assert!(PRONOUN_OVERRIDES.get("US").is_none());
        assert_eq!(PRONOUN_OVERRIDES.get("WE"), Some(&"we"));
    }
}

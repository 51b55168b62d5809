//! Numeric normalization
//!
//! An ordered cascade of regex rewrites. Each rule rewrites the whole
//! string before the next one runs, so the order of `NUMERIC_RULES` is part
//! of the behaviour: currency rules must see `$5.50` before the decimal rule
//! turns it into `5 point 50`.

use crate::lexicon::maps::CURRENCY_SYMBOLS;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "", "thousand", "million", "billion", "trillion", "quadrillion", "quintillion",
];

/// One rewrite in the numeric cascade
pub struct NumericRule {
    pub name: &'static str,
    pattern: Regex,
    expand: fn(&Captures) -> String,
}

impl NumericRule {
    fn new(name: &'static str, pattern: &str, expand: fn(&Captures) -> String) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            expand,
        }
    }

    /// Apply this rule to every match in `text`
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| (self.expand)(caps))
            .into_owned()
    }
}

impl std::fmt::Debug for NumericRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

lazy_static! {
    /// The cascade, in application order
    pub static ref NUMERIC_RULES: Vec<NumericRule> = vec![
        NumericRule::new("thousands_separators", r"([0-9][0-9,]+[0-9])", remove_commas),
        NumericRule::new("pounds", r"£([0-9,]*[0-9]+)", expand_pounds),
        NumericRule::new("dollars", r"\$([0-9.,]*[0-9]+)", expand_dollars),
        NumericRule::new(
            "rupees",
            r"(?P<after>[0-9.]*[0-9]+)\s*₹|₹\s*(?P<before>[0-9.]*[0-9]+)",
            expand_rupees,
        ),
        NumericRule::new("currencies", &currency_pattern(), expand_currency),
        NumericRule::new("units", r"\b([0-9]+)\s*(ft|in|cm|m|km)\b", expand_unit),
        NumericRule::new("percent", r"%", expand_percent),
        NumericRule::new("decimals", r"([0-9]+\.[0-9]+)", expand_decimal_point),
        NumericRule::new("ordinals", r"([0-9]+)(st|nd|rd|th)", expand_ordinal),
        NumericRule::new("integers", r"[0-9]+", expand_integer),
    ];
}

/// Run the whole numeric cascade
pub fn normalize_numbers(text: &str) -> String {
    NUMERIC_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Look up a rule by name, for running a single stage in isolation
pub fn numeric_rule(name: &str) -> Option<&'static NumericRule> {
    NUMERIC_RULES.iter().find(|r| r.name == name)
}

/// Alternation over the generic currency table. Alphabetic codes need a
/// word boundary so `CHFX` is left alone; symbols do not.
fn currency_pattern() -> String {
    let mut codes: Vec<&str> = Vec::new();
    let mut symbols: Vec<&str> = Vec::new();
    for key in CURRENCY_SYMBOLS.keys() {
        if key.chars().all(|c| c.is_ascii_alphabetic()) {
            codes.push(*key);
        } else {
            symbols.push(*key);
        }
    }
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let join = |items: &[&str]| {
        items
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|")
    };
    let codes = join(&codes);
    let symbols = join(&symbols);
    let amount = r"[0-9]+(?:\.[0-9]+)?";

    format!(
        r"(?P<t_amount>{amount})\s*(?:(?P<t_code>{codes})\b|(?P<t_symbol>{symbols}))|(?:\b(?P<l_code>{codes})|(?P<l_symbol>{symbols}))\s*(?P<l_amount>{amount})"
    )
}

/// Which side of the amount a currency marker appeared on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrencyMatch<'t> {
    Trailing { amount: &'t str, symbol: &'t str },
    Leading { symbol: &'t str, amount: &'t str },
}

impl<'t> CurrencyMatch<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        if let Some(amount) = caps.name("t_amount") {
            let symbol = caps.name("t_code").or_else(|| caps.name("t_symbol"))?;
            return Some(CurrencyMatch::Trailing {
                amount: amount.as_str(),
                symbol: symbol.as_str(),
            });
        }
        let symbol = caps.name("l_code").or_else(|| caps.name("l_symbol"))?;
        let amount = caps.name("l_amount")?;
        Some(CurrencyMatch::Leading {
            symbol: symbol.as_str(),
            amount: amount.as_str(),
        })
    }

    fn parts(&self) -> (&'t str, &'t str) {
        match *self {
            CurrencyMatch::Trailing { amount, symbol } => (amount, symbol),
            CurrencyMatch::Leading { symbol, amount } => (amount, symbol),
        }
    }
}

/// Where the rupee sign sat relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RupeeMatch<'t> {
    SignAfter(&'t str),
    SignBefore(&'t str),
}

impl<'t> RupeeMatch<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        if let Some(m) = caps.name("after") {
            Some(RupeeMatch::SignAfter(m.as_str()))
        } else {
            caps.name("before").map(|m| RupeeMatch::SignBefore(m.as_str()))
        }
    }

    fn amount(&self) -> &'t str {
        match *self {
            RupeeMatch::SignAfter(a) | RupeeMatch::SignBefore(a) => a,
        }
    }
}

/// Unit names for a two-level currency
struct MoneyUnits {
    major: (&'static str, &'static str),
    minor: (&'static str, &'static str),
    zero: &'static str,
}

const DOLLAR_UNITS: MoneyUnits = MoneyUnits {
    major: ("dollar", "dollars"),
    minor: ("cent", "cents"),
    zero: "zero dollars",
};

const RUPEE_UNITS: MoneyUnits = MoneyUnits {
    major: ("rupee", "rupees"),
    minor: ("paisa", "paise"),
    zero: "zero rupees",
};

fn unit_for(value: u64, (singular, plural): (&'static str, &'static str)) -> &'static str {
    if value == 1 {
        singular
    } else {
        plural
    }
}

/// Expand `D.C` into spoken money. Unexpected shapes come back verbatim
/// with the plural major unit appended.
fn expand_money(amount: &str, units: &MoneyUnits) -> String {
    let fallback = || format!("{} {}", amount, units.major.1);

    let cleaned = amount.replace(',', "");
    let parts: Vec<&str> = cleaned.split('.').collect();
    if parts.len() > 2 {
        return fallback();
    }

    let parse = |s: &str| -> Option<u64> {
        if s.is_empty() {
            Some(0)
        } else {
            s.parse().ok()
        }
    };

    let major = match parse(parts[0]) {
        Some(v) => v,
        None => return fallback(),
    };
    let minor = match parts.get(1).map(|p| parse(p)).unwrap_or(Some(0)) {
        Some(v) => v,
        None => return fallback(),
    };

    match (major, minor) {
        (0, 0) => units.zero.to_string(),
        (d, 0) => format!("{} {}", d, unit_for(d, units.major)),
        (0, c) => format!("{} {}", c, unit_for(c, units.minor)),
        (d, c) => format!(
            "{} {}, {} {}",
            d,
            unit_for(d, units.major),
            c,
            unit_for(c, units.minor)
        ),
    }
}

fn remove_commas(caps: &Captures) -> String {
    caps[1].replace(',', "")
}

fn expand_pounds(caps: &Captures) -> String {
    format!("{} pounds", &caps[1])
}

fn expand_dollars(caps: &Captures) -> String {
    expand_money(&caps[1], &DOLLAR_UNITS)
}

fn expand_rupees(caps: &Captures) -> String {
    match RupeeMatch::from_captures(caps) {
        Some(m) => expand_money(m.amount(), &RUPEE_UNITS),
        None => caps[0].to_string(),
    }
}

fn expand_currency(caps: &Captures) -> String {
    let Some(m) = CurrencyMatch::from_captures(caps) else {
        return caps[0].to_string();
    };
    let (amount, symbol) = m.parts();
    match CURRENCY_SYMBOLS.get(symbol) {
        Some(name) => format!("{} {}", amount, name),
        None => caps[0].to_string(),
    }
}

fn expand_unit(caps: &Captures) -> String {
    let number = &caps[1];
    let unit = &caps[2];
    let spoken = match unit {
        "ft" => "feet",
        "in" => "inches",
        "cm" => "centimeters",
        "m" => "meters",
        "km" => "kilometers",
        other => other,
    };
    format!("{} {}", number, spoken)
}

fn expand_percent(_caps: &Captures) -> String {
    " percent ".to_string()
}

fn expand_decimal_point(caps: &Captures) -> String {
    caps[1].replace('.', " point ")
}

fn expand_ordinal(caps: &Captures) -> String {
    match caps[1].parse::<u64>() {
        Ok(n) => ordinal_words(n),
        Err(_) => {
            // Past u64: read digit by digit, the last one as an ordinal
            let (head, last) = caps[1].split_at(caps[1].len() - 1);
            let last = last.parse::<u64>().map(ordinal_words).unwrap_or_default();
            format!("{} {}", spell_digits(head), last)
        }
    }
}

fn expand_integer(caps: &Captures) -> String {
    number_words(&caps[0])
}

/// Spoken form of a digit string, with year-style reading for 1001..=2999
pub fn number_words(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(n) if n > 1000 && n < 3000 => year_words(n),
        Ok(n) => cardinal_words(n),
        Err(_) => spell_digits(digits),
    }
}

/// Read each digit on its own: `"0042"` becomes `"zero zero four two"`
pub fn spell_digits(digits: &str) -> String {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| ONES[d as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain cardinal words, space separated, without "and"
pub fn cardinal_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let group = rest % 1000;
        if group != 0 {
            let mut words = below_thousand(group);
            if scale > 0 {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        rest /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Year-style reading, meant for numbers in 1001..=2999
pub fn year_words(n: u64) -> String {
    if n == 2000 {
        "two thousand".to_string()
    } else if n > 2000 && n < 2010 {
        format!("two thousand {}", cardinal_words(n % 100))
    } else if n % 100 == 0 {
        format!("{} hundred", cardinal_words(n / 100))
    } else {
        format!("{} {}", digit_pair(n / 100), digit_pair(n % 100))
    }
}

/// Ordinal words: `21` becomes `"twenty first"`
pub fn ordinal_words(n: u64) -> String {
    let cardinal = cardinal_words(n);
    let (head, last) = match cardinal.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, cardinal.as_str()),
    };

    let last = match last {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{}th", w),
    };

    match head {
        Some(head) => format!("{} {}", head, last),
        None => last,
    }
}

fn below_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

fn below_hundred(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// A two-digit group in a year; a leading zero is read as "oh"
fn digit_pair(n: u64) -> String {
    if n < 10 {
        format!("oh {}", ONES[n as usize])
    } else {
        below_hundred(n)
    }
}

//! Ingredient normalization and canonical keys.
//!
//! Free-text ingredient lines ("2 cups chopped Tomatoes") are reduced to a
//! canonical comparison key ("tomatoes") that the shopping list uses as the
//! deduplication identity. The same line submitted twice, in any spelling of
//! quantity or preparation, merges into a single entry.

use serde::{Deserialize, Serialize};

/// Unit words stripped from ingredient lines.
const UNIT_WORDS: &[&str] = &[
    "tsp", "tbsp", "cup", "cups", "lb", "lbs", "oz", "g", "gram", "grams", "kg", "ml", "clove",
    "cloves", "piece", "pieces",
];

/// Preparation descriptors stripped from ingredient lines.
const DESCRIPTOR_WORDS: &[&str] = &[
    "minced", "diced", "chopped", "sliced", "cubed", "fresh", "ground", "grated",
];

/// The canonical form of an ingredient line.
///
/// An `IngredientKey` can only be obtained through [`IngredientKey::derive`],
/// so two keys compare equal exactly when their source lines normalize to the
/// same text. An empty key means the line contained nothing but quantities,
/// units, and descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientKey(String);

impl IngredientKey {
    /// Derive the canonical key for a free-text ingredient line.
    #[must_use]
    pub fn derive(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Get the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization left nothing to compare on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for IngredientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a free-text ingredient line into its canonical comparison form.
///
/// The transform is applied in a fixed order:
///
/// 1. Lowercase.
/// 2. Strip one leading quantity token (`2`, `1/2`, `1.5`, `1 2`).
/// 3. Remove standalone unit words (tsp, cups, lb, g, ...).
/// 4. Remove `.` and `,`.
/// 5. Remove preparation descriptors (minced, diced, chopped, ...).
/// 6. Collapse runs of 2+ whitespace characters to a single space.
/// 7. Trim.
///
/// The function is pure and idempotent; any input (including the empty string)
/// yields a well-formed key.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_quantity = strip_leading_quantity(&lowered);
    let without_units = remove_words(without_quantity, UNIT_WORDS);
    let without_punct: String = without_units
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();
    let without_descriptors = remove_words(&without_punct, DESCRIPTOR_WORDS);
    collapse_whitespace(&without_descriptors).trim().to_string()
}

/// Strip a single leading quantity token: optional whitespace, a digit run,
/// optionally followed by one of `/`, `.`, or whitespace plus a second digit
/// run, then trailing whitespace. Returns the input unchanged when it does not
/// start with a quantity.
fn strip_leading_quantity(input: &str) -> &str {
    let bytes = input.as_bytes();
    let advance_while = |mut i: usize, pred: fn(&u8) -> bool| {
        while bytes.get(i).is_some_and(pred) {
            i += 1;
        }
        i
    };

    let digits_start = advance_while(0, u8::is_ascii_whitespace);
    let mut i = advance_while(digits_start, u8::is_ascii_digit);
    if i == digits_start {
        return input;
    }

    // Optional fraction or decimal part ("1/2", "1.5", "1 2")
    if bytes
        .get(i)
        .is_some_and(|sep| *sep == b'/' || *sep == b'.' || sep.is_ascii_whitespace())
    {
        let frac_end = advance_while(i + 1, u8::is_ascii_digit);
        if frac_end > i + 1 {
            i = frac_end;
        }
    }

    i = advance_while(i, u8::is_ascii_whitespace);
    input.get(i..).unwrap_or("")
}

/// Remove standalone occurrences of the given words.
///
/// A word matches only as a complete alphanumeric run, so the unit "g" does
/// not eat the "g" in "500g" or "garlic". Delimiters around removed words are
/// kept; the later whitespace collapse cleans them up.
fn remove_words(input: &str, words: &[&str]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| {
        if !token.is_empty() {
            if !words.contains(&token.as_str()) {
                out.push_str(token);
            }
            token.clear();
        }
    };

    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            token.push(c);
        } else {
            flush(&mut token, &mut out);
            out.push(c);
        }
    }
    flush(&mut token, &mut out);

    out
}

/// Collapse runs of 2+ whitespace characters to a single space.
///
/// Single whitespace characters pass through unchanged, matching a
/// `\s{2,}` -> `" "` substitution.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            let mut run = 1;
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
                run += 1;
            }
            if run >= 2 {
                out.push(' ');
            } else {
                out.push(c);
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_quantity_unit_and_descriptor() {
        assert_eq!(normalize("2 cups chopped Tomatoes"), "tomatoes");
        assert_eq!(normalize("1/2 tsp minced Garlic"), "garlic");
        assert_eq!(normalize("1.5 kg ground beef"), "beef");
        assert_eq!(normalize("3 cloves garlic"), "garlic");
    }

    #[test]
    fn test_normalize_removes_punctuation() {
        assert_eq!(normalize("3 Tomatoes, diced"), "tomatoes");
        assert_eq!(normalize("butter, softened."), "butter softened");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("2 cups"), "");
    }

    #[test]
    fn test_normalize_keeps_unrelated_words() {
        assert_eq!(normalize("extra virgin olive oil"), "extra virgin olive oil");
        // "g" only matches as a standalone word, not inside "500g"
        assert_eq!(normalize("flour 500g"), "flour 500g");
        assert_eq!(normalize("garlic"), "garlic");
    }

    #[test]
    fn test_normalize_quantity_only_at_start() {
        assert_eq!(normalize("tomatoes 2"), "tomatoes 2");
        assert_eq!(normalize("  2 tomatoes"), "tomatoes");
        // A leading digit run is stripped even when glued to a unit
        assert_eq!(normalize("500g flour"), "flour");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "2 cups chopped Tomatoes",
            "1/2 tsp minced Garlic",
            "500g flour",
            "extra virgin olive oil",
            "3 Tomatoes, diced",
            "",
            "  spaced   out   input  ",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("olive   oil"), "olive oil");
        assert_eq!(normalize("sea\t\tsalt"), "sea salt");
    }

    #[test]
    fn test_key_equality_across_spellings() {
        let a = IngredientKey::derive("2 Tomatoes");
        let b = IngredientKey::derive("3 Tomatoes, diced");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "tomatoes");
    }

    #[test]
    fn test_key_empty_detection() {
        assert!(IngredientKey::derive("2 cups").is_empty());
        assert!(!IngredientKey::derive("2 cups sugar").is_empty());
    }
}

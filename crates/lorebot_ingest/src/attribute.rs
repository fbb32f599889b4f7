//! Attribute line parsing for lore blocks.

use derive_getters::Getters;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `Name: value` with a capitalized name.
static ATTRIBUTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][0-9A-Za-z\s]+):(.+)$").expect("Valid attribute line regex")
});

/// A second `Name: value` column separated from the first value by a gap of
/// two or more spaces. The last such gap wins, so capitalized words inside the
/// first value stay there and the second name may span words (`Mat Class`).
static COLUMN_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\s{2,}([A-Z][A-Za-z]*(?:\s[A-Za-z]+)*)\s*:(.+)$")
        .expect("Valid column attribute regex")
});

/// A second `Name: value` glued on with single spaces. The first value is
/// matched greedily, so only the last capitalized word before the colon
/// becomes the second name: `Anti Good Immune: fire` splits before `Immune`.
static TRAILING_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\s+([A-Z][a-z]+(?:\s[a-z]+)*)\s*:(.+)$")
        .expect("Valid trailing attribute regex")
});

static LEVEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Level\s+(\d+)$").expect("Valid level name regex"));

/// One `name: value` pair read from a lore line.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AttributePair {
    name: String,
    value: String,
}

impl AttributePair {
    /// Create a pair, normalizing `Level <N>` names.
    ///
    /// `Level 15: fireball` becomes name `level` with value `15 : fireball`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_ingest::AttributePair;
    ///
    /// let pair = AttributePair::new("Level 15", "fireball");
    /// assert_eq!(pair.name(), "level");
    /// assert_eq!(pair.value(), "15 : fireball");
    /// ```
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let value = value.as_ref().trim();

        match LEVEL_NAME.captures(name) {
            Some(caps) => Self {
                name: "level".to_string(),
                value: format!("{} : {}", &caps[1], value),
            },
            None => Self {
                name: name.to_string(),
                value: value.to_string(),
            },
        }
    }

    /// Lowercased attribute name, used for table lookups.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Parse one lore line into zero, one, or two attribute pairs.
///
/// Lines printed in two columns (`Mat Class: natural    Material: organic`)
/// yield both pairs. Lines matching neither form yield nothing, as do pairs
/// whose value is blank.
///
/// # Examples
///
/// ```
/// use lorebot_ingest::parse_attribute_line;
///
/// let pairs = parse_attribute_line("Mat Class: natural    Material: organic");
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0].name(), "Mat Class");
/// assert_eq!(pairs[1].value(), "organic");
///
/// assert!(parse_attribute_line("a glowing ring hums softly").is_empty());
/// ```
pub fn parse_attribute_line(line: &str) -> Vec<AttributePair> {
    let line = line.trim();
    let Some(caps) = ATTRIBUTE_LINE.captures(line) else {
        trace!(line, "Line is not an attribute");
        return Vec::new();
    };

    let name = caps[1].trim();
    let rest = caps[2].trim();

    let second = rest
        .find(':')
        .filter(|&idx| idx > 0)
        .and_then(|_| {
            COLUMN_ATTRIBUTE
                .captures(rest)
                .or_else(|| TRAILING_ATTRIBUTE.captures(rest))
        });

    let pairs = match second {
        Some(inner) => vec![
            AttributePair::new(name, &inner[1]),
            AttributePair::new(&inner[2], &inner[3]),
        ],
        None => vec![AttributePair::new(name, rest)],
    };

    pairs
        .into_iter()
        .filter(|pair| !pair.value.is_empty())
        .collect()
}

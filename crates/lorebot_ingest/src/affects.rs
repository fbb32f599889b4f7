//! Display formatting for accumulated `Affects` strings.

use regex::Regex;
use std::sync::LazyLock;

static AFFECT_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_\s]+)\s*by\s*(.+)$").expect("Valid affect regex"));

const LABEL: &str = "Affects";

/// Render a comma-joined affects string as one aligned line per entry.
///
/// # Examples
///
/// ```
/// use lorebot_ingest::format_affects;
///
/// let text = format_affects("strength by 2,casting level by 1");
/// assert_eq!(
///     text,
///     "Affects  : STRENGTH      by 2\nAffects  : casting level by 1\n"
/// );
/// ```
pub fn format_affects(affects: &str) -> String {
    let affects = affects.trim();
    if affects.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for entry in affects.split(',').map(str::trim) {
        let line = match AFFECT_BY.captures(entry) {
            Some(caps) => {
                let name = caps[1].trim();
                let amount = &caps[2];
                if name == "casting level" || name == "spell slots" {
                    format!("{LABEL:<9}: {name:<14}by {amount}")
                } else if name.to_lowercase().starts_with("skill ") {
                    format!("{LABEL:<9}: {:<20}by {amount}", name.to_lowercase())
                } else if name.len() >= 13 {
                    format!("{LABEL:<9}: {} by  {amount}", name.to_lowercase())
                } else {
                    format!("{LABEL:<9}: {:<14}by {amount}", name.to_uppercase())
                }
            }
            None => format!("{LABEL:<9}: {entry}"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_entries_are_lowercased_and_wide() {
        assert_eq!(
            format_affects("Skill Parry by 5"),
            "Affects  : skill parry         by 5\n"
        );
    }

    #[test]
    fn test_long_names_keep_two_spaces() {
        assert_eq!(
            format_affects("armor class bonus by -10"),
            "Affects  : armor class bonus by  -10\n"
        );
    }

    #[test]
    fn test_entry_without_by_is_verbatim() {
        assert_eq!(format_affects("sanctuary"), "Affects  : sanctuary\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_affects("  "), "");
    }
}

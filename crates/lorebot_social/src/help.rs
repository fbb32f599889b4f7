//! The `help` reply.

/// Command overview shown by `/help`, as a code block.
///
/// # Examples
///
/// ```
/// let text = lorebot_social::help_text();
/// assert!(text.starts_with("```"));
/// assert!(text.contains("/whoall"));
/// ```
pub fn help_text() -> String {
    let lines = [
        format!("** Discord Lorebot v{} **", env!("CARGO_PKG_VERSION")),
        "/help    - Lists the different commands available".to_string(),
        "/stat    - syntax: /stat <item>, example: /stat huma.shield".to_string(),
        "/brief   - syntax: /brief <item>, example: /brief huma.shield".to_string(),
        "/who     - shows character info, example: /who Drunoob".to_string(),
        "/whoall  - shows all characters".to_string(),
        "/query   - multi criteria with &, example: /query affects=damroll by 2".to_string(),
        "/recent  - shows latest lores and looks".to_string(),
        String::new(),
        "Paste lore (Object '...') or look output (<Name> is using:) to record it.".to_string(),
    ];
    format!("```{}```", lines.join("\n"))
}

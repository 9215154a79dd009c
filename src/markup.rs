use regex::Regex;

pub const ELLIPSIS: char = '…';
pub const CODE_PLACEHOLDER: &str = "(code)";
pub const IMAGE_PLACEHOLDER: &str = "(image)";

/// Turns freeform marked-up note text into clean plain text for labels and
/// tooltips.
///
/// The rules run in a fixed order: multi-character constructs (fenced code,
/// images, links, embeds, double-bracket references, bold) are resolved
/// before single-character ones (italic, inline code), otherwise inputs
/// combining several kinds come out wrong — e.g. the `**` of bold being
/// eaten as two italic markers.
pub struct Labeler {
    rules: Vec<(Regex, &'static str)>,
}

impl Labeler {
    pub fn new() -> Self {
        let patterns: &[(&str, &'static str)] = &[
            // Fenced code blocks collapse to a placeholder token
            (r"(?s)```.*?```", CODE_PLACEHOLDER),
            // Images collapse to a placeholder, before links so `![..](..)`
            // is not half-eaten by the link rule
            (r"!\[[^\]]*\]\([^)]*\)", IMAGE_PLACEHOLDER),
            // Links keep only their text
            (r"\[([^\[\]]*)\]\([^)]*\)", "$1"),
            // Embedded references become a directional arrow
            (r"\{\{embed\s+([^}]*)\}\}", "→ $1"),
            // Tag references keep the leading hash
            (r"#\[\[([^\]]+)\]\]", "#$1"),
            // Nested page references keep the name
            (r"\[\[([^\]]+)\]\]", "$1"),
            // Any remaining templating braces are dropped entirely
            (r"\{\{[^}]*\}\}", ""),
            // Bold before italic
            (r"\*\*([^*]+)\*\*", "$1"),
            (r"__([^_]+)__", "$1"),
            (r"~~([^~]+)~~", "$1"),
            (r"\*([^*]+)\*", "$1"),
            (r"_([^_]+)_", "$1"),
            // Inline code spans, after fenced blocks
            (r"`([^`]+)`", "$1"),
        ];

        Self {
            rules: patterns
                .iter()
                .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
                .collect(),
        }
    }

    /// Remove markup and trim surrounding whitespace. Idempotent on text that
    /// is already clean.
    pub fn strip(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (re, replacement) in &self.rules {
            out = re.replace_all(&out, *replacement).into_owned();
        }
        out.trim().to_string()
    }

    /// Strip markup, then cut to at most `max_len` characters, marking the
    /// cut with an ellipsis. Counts chars, not bytes, so multi-byte text
    /// never splits mid-character.
    pub fn truncate(&self, text: &str, max_len: usize) -> String {
        let stripped = self.strip(text);
        if stripped.chars().count() <= max_len {
            return stripped;
        }

        let keep = max_len.saturating_sub(1);
        let mut out: String = stripped.chars().take(keep).collect();
        out.push(ELLIPSIS);
        out
    }
}

impl Default for Labeler {
    fn default() -> Self {
        Self::new()
    }
}

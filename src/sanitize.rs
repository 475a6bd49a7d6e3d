//! Scrubbing of assistant replies before they reach the conversation log.
//!
//! Some backend replies open with a citation preamble ("According to the
//! sources, ...") and carry inline markers like `[3]`. Both are removed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Single-line `[...]` markers along with the whitespace that separates them
/// from the text.
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\[[^\]\n]+\]").expect("valid citation pattern"));

/// "according to the sources" up through the first following comma on the
/// same line.
static SOURCE_PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)according to the sources[^,\n]*,\s*").expect("valid preamble pattern")
});

/// Clean a raw assistant reply for display.
///
/// Markers go first, so a bracket holding a comma never ends the preamble
/// early. Both passes repeat until the text stops changing, so removals that
/// splice a new marker or preamble together are cleaned as well and the
/// function is idempotent for every input.
pub fn sanitize(raw_reply: &str) -> String {
    let mut text = raw_reply.to_string();
    loop {
        let cleaned = {
            let without_markers = CITATION_MARKER.replace_all(&text, "");
            SOURCE_PREAMBLE
                .replace_all(&without_markers, "")
                .into_owned()
        };
        // Every replacement shortens the text, so this terminates.
        if cleaned == text {
            break;
        }
        text = cleaned;
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn strips_preamble_and_markers() {
        assert_eq!(
            sanitize("According to the sources, X [12] is true."),
            "X is true."
        );
    }

    #[test]
    fn strips_trailing_marker() {
        assert_eq!(sanitize("Hello [1]"), "Hello");
    }

    #[test]
    fn preamble_match_is_case_insensitive() {
        assert_eq!(
            sanitize("ACCORDING TO THE SOURCES PROVIDED, tailor your resume."),
            "tailor your resume."
        );
    }

    #[test]
    fn preamble_in_the_middle_is_removed() {
        assert_eq!(
            sanitize("Sure. According to the sources, you have 5 years of Rust."),
            "Sure. you have 5 years of Rust."
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(sanitize("  Plain answer.  "), "Plain answer.");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn empty_brackets_are_not_citations() {
        assert_eq!(sanitize("an array [] literal"), "an array [] literal");
    }

    #[test]
    fn removes_multiple_markers() {
        assert_eq!(
            sanitize("Skills[1][2] and experience [source: resume.pdf, p.2] match."),
            "Skills and experience match."
        );
    }

    #[test]
    fn preamble_never_reaches_past_its_line() {
        let reply = "Nothing here is according to the sources I have.\n\nYou should apply, definitely.";
        assert_eq!(sanitize(reply), reply);
    }

    #[test]
    fn markers_never_span_lines() {
        let reply = "Open [draft\nsecond line] here";
        assert_eq!(sanitize(reply), reply);
    }

    #[test]
    fn comma_inside_marker_does_not_end_preamble() {
        assert_eq!(
            sanitize("According to the sources [resume.pdf, p.2], you fit."),
            "you fit."
        );
    }

    #[test]
    fn spliced_patterns_are_cleaned_too() {
        // Removing the marker forms a fresh preamble.
        assert_eq!(sanitize("according to the sour[x]ces, Rust"), "Rust");
        // Removing the preamble forms a fresh preamble.
        assert_eq!(
            sanitize("according to the saccording to the sources, ources, Rust"),
            "Rust"
        );
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "According to the sources, X [12] is true.",
            "Hello [1]",
            "according to the sour[x]ces, Rust",
            "according to the saccording to the sources, ources, Rust",
            "[[nested] marker] left",
            "no comma according to the sources here",
            "according to the sources here\nthen, later",
            "[]x] odd brackets [",
            "  spaced   out  ",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
        }
    }
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_FILLER: Regex = Regex::new(
        r"(?i)^(Alright,?|Yes,?|Sure,?|Okay,?|Hello there!?|Hi there!?|Hey there!?)\s*"
    )
    .unwrap();
    static ref TALK_ABOUT: Regex = Regex::new(r"(?i)let's talk about").unwrap();
    static ref HELP_YOU_WITH: Regex = Regex::new(r"(?i)let me help you with").unwrap();
    static ref EXCESS_BREAKS: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Cleans free-text advice. Each rewrite runs once, in order; the two phrase
/// rewrites only touch their first occurrence.
pub fn sanitize(raw: &str) -> String {
    let text = LEADING_FILLER.replace(raw, "");
    let text = TALK_ABOUT.replace(&text, "Let's discuss");
    let text = HELP_YOU_WITH.replace(&text, "Here's guidance on");
    let text = EXCESS_BREAKS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_filler_and_collapses_breaks() {
        assert_eq!(
            sanitize("Alright, let's talk about blight.\n\n\n\nTreat it now."),
            "Let's discuss blight.\n\nTreat it now."
        );
    }

    #[test]
    fn filler_is_case_insensitive_and_only_at_start() {
        assert_eq!(sanitize("HELLO THERE! Water less."), "Water less.");
        assert_eq!(sanitize("hey there Prune it."), "Prune it.");
        assert_eq!(sanitize("Okay Spray weekly."), "Spray weekly.");
        assert_eq!(sanitize("Prune it. Sure, why not."), "Prune it. Sure, why not.");
    }

    #[test]
    fn only_one_filler_is_stripped() {
        assert_eq!(sanitize("Sure, Okay, Spray."), "Okay, Spray.");
    }

    #[test]
    fn rewrites_help_phrase() {
        assert_eq!(
            sanitize("Let me help you with rust fungus."),
            "Here's guidance on rust fungus."
        );
    }

    #[test]
    fn phrase_rewrites_touch_first_occurrence_only() {
        assert_eq!(
            sanitize("let's talk about A. let's talk about B."),
            "Let's discuss A. let's talk about B."
        );
    }

    #[test]
    fn two_line_breaks_are_kept() {
        assert_eq!(sanitize("One.\n\nTwo.\nThree."), "One.\n\nTwo.\nThree.");
    }

    #[test]
    fn clean_text_is_a_fixed_point() {
        let clean = "Remove infected leaves.\n\nApply copper fungicide every 7 days.";
        assert_eq!(sanitize(clean), clean);
        assert_eq!(sanitize(&sanitize(clean)), sanitize(clean));
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(sanitize("  \n\n\n\t "), "");
        assert_eq!(sanitize("Sure,"), "");
        assert_eq!(sanitize(""), "");
    }
}

//! Prompt patterns
//!
//! Each [`Pattern`] maps an ordered set of labeled fields (or an unlabeled,
//! capped keyword list) onto one fixed instruction sentence. Validation runs
//! before rendering, so a template only ever sees the item count it declared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Arity, PatternError, Result};
use crate::registry;

/// Most keywords accepted by [`Pattern::Keywords`]
pub const MAX_KEYWORDS: usize = 10;

/// Opening sentence shared by most templates
const PREAMBLE: &str = "You are an AI assistant.";

/// Strip surrounding whitespace, including the ASCII separators U+001C..U+001F
pub(crate) fn strip(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// The closed set of supported prompt patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Pattern {
    /// Role, Task, Format
    Rtf,
    /// Task, Action, Goal
    Tag,
    /// Before, After, Bridge
    Bab,
    /// Context, Action, Result, Example
    Care,
    /// Action, Purpose, Outcome
    Apo,
    /// Role, Audience, Context, Constraints, Actions
    Raccca,
    /// Position, Goal, Task, Constraints
    Pgtc,
    /// Up to ten unlabeled keywords
    Keywords,
}

impl Pattern {
    /// Every pattern, in registry order
    pub const ALL: [Pattern; 8] = [
        Self::Rtf,
        Self::Tag,
        Self::Bab,
        Self::Care,
        Self::Apo,
        Self::Raccca,
        Self::Pgtc,
        Self::Keywords,
    ];

    /// Registry key for this pattern
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rtf => "RTF",
            Self::Tag => "TAG",
            Self::Bab => "BAB",
            Self::Care => "CARE",
            Self::Apo => "APO",
            Self::Raccca => "RACCCA",
            Self::Pgtc => "PGTC",
            Self::Keywords => "KEYWORDS",
        }
    }

    /// Ordered field labels; empty for the variable-arity pattern
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Rtf => &["Role", "Task", "Format"],
            Self::Tag => &["Task", "Action", "Goal"],
            Self::Bab => &["Before", "After", "Bridge"],
            Self::Care => &["Context", "Action", "Result", "Example"],
            Self::Apo => &["Action", "Purpose", "Outcome"],
            Self::Raccca => &["Role", "Audience", "Context", "Constraints", "Actions"],
            Self::Pgtc => &["Position", "Goal", "Task", "Constraints"],
            Self::Keywords => &[],
        }
    }

    /// Item cap for the variable-arity pattern
    pub fn max_items(&self) -> Option<usize> {
        match self {
            Self::Keywords => Some(MAX_KEYWORDS),
            _ => None,
        }
    }

    pub fn arity(&self) -> Arity {
        match self.max_items() {
            Some(max) => Arity::AtMost(max),
            None => Arity::Exactly(self.fields()),
        }
    }

    /// One-line summary of what the template asks for
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rtf => "Assign a role, state the task, and fix the answer format",
            Self::Tag => "Describe the task, the action to take, and the overall goal",
            Self::Bab => "Contrast the current and desired states and ask for a plan to bridge them",
            Self::Care => "Give context, the required action, the expected result, and an example",
            Self::Apo => "Request an action with its purpose and desired outcome",
            Self::Raccca => "Set a role and audience, then give context, constraints, and actions",
            Self::Pgtc => "State a position, goal, task, and constraints",
            Self::Keywords => "Ask for a prompt that weaves in up to ten keywords",
        }
    }

    /// Check an item count against this pattern's contract
    ///
    /// The cap is checked before the fixed field list, so a pattern declaring
    /// both reports the cap first.
    pub fn validate(&self, count: usize) -> Result<()> {
        if let Some(max) = self.max_items().filter(|max| count > *max) {
            return Err(self.mismatch(Arity::AtMost(max), count));
        }

        let fields = self.fields();
        if !fields.is_empty() && count != fields.len() {
            return Err(self.mismatch(Arity::Exactly(fields), count));
        }

        debug!(pattern = self.name(), count, "Validated pattern items");
        Ok(())
    }

    /// Validate `items` and render them through this pattern's template
    pub fn render<S: AsRef<str>>(&self, items: &[S]) -> Result<String> {
        Ok(PatternInstance::new(*self, items)?.render())
    }

    fn mismatch(&self, expected: Arity, actual: usize) -> PatternError {
        PatternError::ArityMismatch {
            pattern: *self,
            expected,
            actual,
        }
    }

    /// Fill the template; `items` already satisfies the arity
    fn fill(&self, items: &[String]) -> String {
        let f = |i: usize| strip(&items[i]);
        match self {
            Self::Rtf => format!(
                "{PREAMBLE} {}. Your task is to {}. Provide your answer in the following format: {}",
                f(0),
                f(1),
                f(2)
            ),
            Self::Tag => format!(
                "{PREAMBLE} Task: {}. Action to take: {}. Overall goal: {}.",
                f(0),
                f(1),
                f(2)
            ),
            Self::Bab => format!(
                "{PREAMBLE} Current situation (Before): {}. Desired outcome (After): {}. \
                 Provide a detailed plan to bridge the gap: {}",
                f(0),
                f(1),
                f(2)
            ),
            Self::Care => format!(
                "{PREAMBLE} Context: {}. Required action: {}. Expected result: {}. Illustrative example: {}.",
                f(0),
                f(1),
                f(2),
                f(3)
            ),
            Self::Apo => format!(
                "{PREAMBLE} Please {}. Purpose: {}. Desired outcome: {}.",
                f(0),
                f(1),
                f(2)
            ),
            Self::Raccca => format!(
                "You are {} acting as an AI assistant for {}. Context: {}. \
                 Please observe the following constraints: {}. Perform these actions: {}.",
                f(0),
                f(1),
                f(2),
                f(3),
                f(4)
            ),
            Self::Pgtc => format!(
                "{PREAMBLE} Position: {}. Goal: {}. Task: {}. Constraints: {}.",
                f(0),
                f(1),
                f(2),
                f(3)
            ),
            Self::Keywords => {
                let keywords = items.iter().map(|kw| strip(kw)).collect::<Vec<_>>().join(", ");
                format!(
                    "{PREAMBLE} Craft a high-quality prompt that naturally incorporates the following keywords: {}.",
                    keywords
                )
            }
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        registry::lookup(s)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(name: String) -> Result<Self> {
        registry::lookup(&name)
    }
}

/// A pattern bound to one call's items
///
/// Construction validates, so an existing instance always renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInstance {
    pattern: Pattern,
    items: Vec<String>,
}

impl PatternInstance {
    pub fn new<S: AsRef<str>>(pattern: Pattern, items: &[S]) -> Result<Self> {
        pattern.validate(items.len())?;
        Ok(Self {
            pattern,
            items: items.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Raw items as supplied, untrimmed
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Field label paired with each item; empty for keyword lists
    pub fn bindings(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pattern
            .fields()
            .iter()
            .copied()
            .zip(self.items.iter().map(String::as_str))
    }

    pub fn render(&self) -> String {
        self.pattern.fill(&self.items)
    }
}

impl std::fmt::Display for PatternInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_arity_fields() {
        for pattern in Pattern::ALL {
            match pattern {
                Pattern::Keywords => {
                    assert!(pattern.fields().is_empty());
                    assert_eq!(pattern.max_items(), Some(MAX_KEYWORDS));
                }
                _ => {
                    assert!(!pattern.fields().is_empty());
                    assert_eq!(pattern.max_items(), None);
                }
            }
        }
    }

    #[test]
    fn test_validate_exact_count() {
        assert!(Pattern::Care.validate(4).is_ok());
        assert!(Pattern::Care.validate(3).is_err());
        assert!(Pattern::Care.validate(5).is_err());
        assert!(Pattern::Raccca.validate(5).is_ok());
        assert!(Pattern::Rtf.validate(0).is_err());
    }

    #[test]
    fn test_validate_keyword_cap() {
        assert!(Pattern::Keywords.validate(0).is_ok());
        assert!(Pattern::Keywords.validate(10).is_ok());

        let err = Pattern::Keywords.validate(11).unwrap_err();
        assert_eq!(
            err,
            PatternError::ArityMismatch {
                pattern: Pattern::Keywords,
                expected: Arity::AtMost(10),
                actual: 11,
            }
        );
    }

    #[test]
    fn test_render_rtf() {
        let prompt = Pattern::Rtf
            .render(&["a helpful tutor", "explain recursion", "a numbered list"])
            .unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. a helpful tutor. Your task is to explain recursion. \
             Provide your answer in the following format: a numbered list"
        );
    }

    #[test]
    fn test_render_tag_trims_fields() {
        let prompt = Pattern::Tag.render(&["  do X  ", "Y", "\tZ\n"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Task: do X. Action to take: Y. Overall goal: Z."
        );
    }

    #[test]
    fn test_render_bab() {
        let prompt = Pattern::Bab.render(&["slow builds", "fast builds", "caching"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Current situation (Before): slow builds. \
             Desired outcome (After): fast builds. Provide a detailed plan to bridge the gap: caching"
        );
    }

    #[test]
    fn test_render_care() {
        let prompt = Pattern::Care.render(&["c", "a", "r", "e"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Context: c. Required action: a. Expected result: r. Illustrative example: e."
        );
    }

    #[test]
    fn test_render_apo() {
        let prompt = Pattern::Apo.render(&["summarize", "brevity", "one paragraph"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Please summarize. Purpose: brevity. Desired outcome: one paragraph."
        );
    }

    #[test]
    fn test_render_raccca() {
        let prompt = Pattern::Raccca
            .render(&["a chef", "beginners", "home kitchen", "no oven", "plan a menu"])
            .unwrap();
        assert_eq!(
            prompt,
            "You are a chef acting as an AI assistant for beginners. Context: home kitchen. \
             Please observe the following constraints: no oven. Perform these actions: plan a menu."
        );
    }

    #[test]
    fn test_render_pgtc() {
        let prompt = Pattern::Pgtc.render(&["lead", "ship", "review", "one day"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Position: lead. Goal: ship. Task: review. Constraints: one day."
        );
    }

    #[test]
    fn test_render_keywords() {
        let prompt = Pattern::Keywords.render(&[" ocean ", "sunrise"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Craft a high-quality prompt that naturally incorporates \
             the following keywords: ocean, sunrise."
        );
    }

    #[test]
    fn test_render_empty_keywords() {
        let prompt = Pattern::Keywords.render::<&str>(&[]).unwrap();
        assert!(prompt.ends_with("the following keywords: ."));
    }

    #[test]
    fn test_empty_fields_accepted() {
        let prompt = Pattern::Rtf.render(&["", "   ", "x"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. . Your task is to . Provide your answer in the following format: x"
        );
    }

    #[test]
    fn test_instance_bindings() {
        let instance = PatternInstance::new(Pattern::Apo, &["a", "b", "c"]).unwrap();
        let bound: Vec<_> = instance.bindings().collect();
        assert_eq!(bound, vec![("Action", "a"), ("Purpose", "b"), ("Outcome", "c")]);

        let keywords = PatternInstance::new(Pattern::Keywords, &["x", "y"]).unwrap();
        assert_eq!(keywords.bindings().count(), 0);
        assert_eq!(keywords.items(), ["x", "y"]);
    }

    #[test]
    fn test_instance_display_matches_render() {
        let instance = PatternInstance::new(Pattern::Tag, &["t", "a", "g"]).unwrap();
        assert_eq!(instance.to_string(), instance.render());
    }

    #[test]
    fn test_instance_rejects_bad_count() {
        let result = PatternInstance::new(Pattern::Pgtc, &["only one"]);
        assert!(result.unwrap_err().is_arity_mismatch());
    }

    #[test]
    fn test_pattern_display_and_parse() {
        assert_eq!(Pattern::Raccca.to_string(), "RACCCA");
        assert_eq!(" bab ".parse::<Pattern>().unwrap(), Pattern::Bab);
        assert!("nope".parse::<Pattern>().unwrap_err().is_unknown_pattern());
    }

    #[test]
    fn test_pattern_serde() {
        let json = serde_json::to_string(&Pattern::Keywords).unwrap();
        assert_eq!(json, "\"KEYWORDS\"");

        let pattern: Pattern = serde_json::from_str("\"PGTC\"").unwrap();
        assert_eq!(pattern, Pattern::Pgtc);
    }

    #[test]
    fn test_pattern_deserialize_normalizes_name() {
        let pattern: Pattern = serde_json::from_str("\" rtf \"").unwrap();
        assert_eq!(pattern, Pattern::Rtf);

        let err = serde_json::from_str::<Pattern>("\"nope\"").unwrap_err();
        assert!(err.to_string().contains("Unknown pattern type 'nope'"));
    }

    #[test]
    fn test_strip_ascii_separators() {
        assert_eq!(strip("\x1c\x1d do X \x1e\x1f"), "do X");
        assert_eq!(strip("\u{a0}y\u{2003}"), "y");
        assert_eq!(strip("a\x1fb"), "a\x1fb");
    }

    #[test]
    fn test_render_strips_ascii_separators() {
        let prompt = Pattern::Tag.render(&["\x1fdo X\x1f", "Y", "Z"]).unwrap();
        assert_eq!(
            prompt,
            "You are an AI assistant. Task: do X. Action to take: Y. Overall goal: Z."
        );

        let keywords = Pattern::Keywords.render(&["\x1cocean", "sunrise\x1d"]).unwrap();
        assert!(keywords.ends_with("keywords: ocean, sunrise."));
    }
}

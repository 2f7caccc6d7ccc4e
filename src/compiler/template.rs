//! Output templates with positional backreferences.

use std::fmt;

/// A compiled output template.
///
/// The template is the output column of a rule after mapping-reference
/// expansion; its only dynamic content is backreference markers of the form
/// `[$N]`, where `N` is a 1-based index into the intermediates collected
/// while walking the rule trie. Everything else is emitted literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutput {
    template: String,
}

impl RuleOutput {
    pub(crate) fn new(template: impl Into<String>) -> Self {
        RuleOutput { template: template.into() }
    }

    /// Resolve every backreference marker against `intermediates`.
    ///
    /// Markers are rewritten one at a time, leftmost first, until none
    /// remain. An index past the end of `intermediates` (or one too large to
    /// parse) substitutes the empty string. Pure: the template itself is
    /// never mutated, so the same compiled rule can be re-evaluated for every
    /// partial-input re-simulation.
    pub fn generate(&self, intermediates: &[String]) -> String {
        let marker = regex!(r"\[\$([0-9]+)\]");
        let mut result = self.template.clone();
        loop {
            let Some(caps) = marker.captures(&result) else { break };
            let range = match caps.get(0) {
                Some(m) => m.range(),
                None => break,
            };
            let index = caps[1].parse::<usize>().ok();
            let replacement = index
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| intermediates.get(i))
                .map(String::as_str)
                .unwrap_or("");
            result.replace_range(range, replacement);
        }
        result
    }
}

impl fmt::Display for RuleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}

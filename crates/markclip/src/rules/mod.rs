//! Rule system for Markdown conversion.

mod builtin;
mod rule;

pub use builtin::{builtin_rules, INJECTED_UI_CLASS, NON_CONTENT_TAGS, PRESERVED_TAGS};
pub use rule::{Filter, PredicateFn, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::NodeRef;
use crate::service::ConvertOptions;

/// Ordered collection of conversion rules.
///
/// Registration order is resolution priority: the first rule whose filter
/// matches a node governs it, and later registrations can never preempt
/// earlier ones. The built-in catalogue registers its removal rules ahead of
/// the content rules for exactly this reason.
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Create a rule set holding the built-in catalogue
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Create a rule set with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Append a rule under a unique name.
    ///
    /// Returns `false` without touching the set when the name is already
    /// registered; the earlier rule keeps both its position and behavior.
    pub fn add(&mut self, name: &str, rule: Rule) -> bool {
        if self.rules.contains_key(name) {
            log::warn!("rule '{}' already registered, keeping the earlier one", name);
            return false;
        }
        self.rules.insert(name.to_string(), rule);
        true
    }

    /// Check whether a rule name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the governing rule for a node.
    ///
    /// Iterates rules in registration order and returns the first whose
    /// filter matches, along with its name. A filter that fails is logged
    /// and treated as a non-match, so a broken custom predicate can never
    /// mask the rules behind it. Pure for a fixed set and node.
    pub fn resolve(&self, node: &NodeRef, options: &ConvertOptions) -> Option<(&str, &Rule)> {
        for (name, rule) in &self.rules {
            match rule.filter.matches(node, options) {
                Ok(true) => return Some((name.as_str(), rule)),
                Ok(false) => {}
                Err(err) => {
                    log::debug!("filter for rule '{}' failed, skipping: {}", name, err);
                }
            }
        }
        None
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeRef};

    #[test]
    fn test_builtin_set_is_populated() {
        let rules = RuleSet::new();
        assert!(rules.contains("code-block"));
        assert!(rules.contains("table"));
        assert!(rules.contains("injected-ui"));
        assert!(!RuleSet::empty().contains("table"));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut rules = RuleSet::empty();
        assert!(rules.add("mark", Rule::for_tag("mark", |_, _, c| Ok(format!("=={}==", c)))));
        assert!(!rules.add("mark", Rule::for_tag("mark", |_, _, c| Ok(c.to_string()))));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_resolve_prefers_earlier_registration() {
        let mut rules = RuleSet::empty();
        rules.add("first", Rule::for_tag("p", |_, _, _| Ok("first".into())));
        rules.add("second", Rule::for_tag("p", |_, _, _| Ok("second".into())));

        let p = Node::element("p");
        let (name, _) = rules
            .resolve(&NodeRef::new(&p), &ConvertOptions::default())
            .unwrap();
        assert_eq!(name, "first");
    }

    #[test]
    fn test_failing_filter_is_a_non_match() {
        let mut rules = RuleSet::empty();
        rules.add(
            "broken",
            Rule::new(
                Filter::predicate(|_, _| Err(crate::ConvertError::rule("no such capability"))),
                |_, _, _| Ok("broken".into()),
            ),
        );
        rules.add("fallback", Rule::for_tag("p", |_, _, _| Ok("fallback".into())));

        let p = Node::element("p");
        let (name, _) = rules
            .resolve(&NodeRef::new(&p), &ConvertOptions::default())
            .unwrap();
        assert_eq!(name, "fallback");
    }
}

//! Selector types for locating elements on portal pages.
//!
//! A logical UI target (the login button, the resources tab, ...) is
//! described by a [`SelectorList`]: an ordered, non-empty sequence of
//! [`SelectorSpec`]s where the first entry is the preferred locator and the
//! rest are fallbacks for when the markup drifts. Lists are consumed through
//! [`crate::resolver::resolve`], never indexed.
//!
//! Patterns that depend on runtime values (a course code, a section title)
//! are written as [`SelectorTemplate`]s with `{name}` placeholders and
//! rendered into specs on demand.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::{HarvesterError, HarvesterResult};

/// Query strategy for a selector pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// XPath 1.0 expression
    XPath,
    /// CSS selector (groups allowed)
    Css,
}

impl Strategy {
    /// Lowercase tag for this strategy
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::XPath => "xpath",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = HarvesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xpath" => Ok(Self::XPath),
            "css" => Ok(Self::Css),
            _ => Err(HarvesterError::UnknownStrategy { tag: s.to_string() }),
        }
    }
}

/// A single (strategy, pattern) locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorSpec {
    strategy: Strategy,
    pattern: Cow<'static, str>,
}

impl SelectorSpec {
    /// Create a selector from a strategy and pattern
    #[must_use]
    pub fn new(strategy: Strategy, pattern: impl Into<Cow<'static, str>>) -> Self {
        Self {
            strategy,
            pattern: pattern.into(),
        }
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Strategy::XPath, pattern)
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Strategy::Css, pattern)
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Convert to a JavaScript expression yielding the first match or `null`.
    ///
    /// Useful for drivers that evaluate script in the page (CDP, WebDriver
    /// `execute_script`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let pattern = self.pattern();
        match self.strategy {
            Strategy::Css => format!("document.querySelector({pattern:?})"),
            Strategy::XPath => format!(
                "document.evaluate({pattern:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
        }
    }
}

impl fmt::Display for SelectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.pattern)
    }
}

/// Ordered, non-empty fallback list of selectors.
///
/// Priority is position: the first entry is preferred, later entries are
/// only tried when earlier ones fail to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SelectorSpec>", into = "Vec<SelectorSpec>")]
pub struct SelectorList {
    entries: Vec<SelectorSpec>,
}

#[allow(clippy::len_without_is_empty)]
impl SelectorList {
    /// Create a list from the preferred selector and its fallbacks
    #[must_use]
    pub fn new(primary: SelectorSpec, fallbacks: impl IntoIterator<Item = SelectorSpec>) -> Self {
        let mut entries = vec![primary];
        entries.extend(fallbacks);
        Self { entries }
    }

    /// Create a list with a single selector
    #[must_use]
    pub fn single(selector: SelectorSpec) -> Self {
        Self {
            entries: vec![selector],
        }
    }

    /// The preferred selector
    #[must_use]
    pub fn primary(&self) -> &SelectorSpec {
        &self.entries[0]
    }

    /// Number of selectors, always at least one
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, SelectorSpec> {
        self.entries.iter()
    }
}

impl TryFrom<Vec<SelectorSpec>> for SelectorList {
    type Error = HarvesterError;

    fn try_from(entries: Vec<SelectorSpec>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(HarvesterError::EmptySelectorList);
        }
        Ok(Self { entries })
    }
}

impl From<SelectorList> for Vec<SelectorSpec> {
    fn from(list: SelectorList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a SelectorSpec;
    type IntoIter = std::slice::Iter<'a, SelectorSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, spec) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spec}")?;
        }
        f.write_str("]")
    }
}

/// A selector pattern with `{name}` placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorTemplate {
    strategy: Strategy,
    pattern: &'static str,
}

impl SelectorTemplate {
    /// Create an XPath template
    #[must_use]
    pub const fn xpath(pattern: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            pattern,
        }
    }

    /// Create a CSS template
    #[must_use]
    pub const fn css(pattern: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            pattern,
        }
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the raw pattern
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Placeholder names in order of first appearance
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.pattern;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match placeholder_name(after) {
                Some(name) => {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                    rest = &after[name.len() + 1..];
                }
                None => rest = after,
            }
        }
        names
    }

    /// The pattern as a selector, without substitution
    #[must_use]
    pub fn spec(&self) -> SelectorSpec {
        SelectorSpec::new(self.strategy, self.pattern)
    }

    /// Substitute every placeholder from `params`.
    ///
    /// Unused params are ignored. A placeholder without a value is an error.
    pub fn render(&self, params: &[(&str, &str)]) -> HarvesterResult<SelectorSpec> {
        let mut out = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match placeholder_name(after) {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| HarvesterError::TemplateError {
                            template: self.pattern.to_string(),
                            placeholder: name.to_string(),
                        })?;
                    out.push_str(value);
                    rest = &after[name.len() + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(SelectorSpec::new(self.strategy, out))
    }
}

/// Identifier up to the next `}` if the text is a placeholder body
fn placeholder_name(after_open: &str) -> Option<&str> {
    let end = after_open.find('}')?;
    let name = &after_open[..end];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

/// Static, non-empty fallback list of templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateList {
    primary: SelectorTemplate,
    fallbacks: &'static [SelectorTemplate],
}

impl TemplateList {
    /// Create a template list from the preferred template and its fallbacks
    #[must_use]
    pub const fn new(primary: SelectorTemplate, fallbacks: &'static [SelectorTemplate]) -> Self {
        Self { primary, fallbacks }
    }

    /// Create a template list with a single template
    #[must_use]
    pub const fn single(primary: SelectorTemplate) -> Self {
        Self::new(primary, &[])
    }

    /// Iterate templates in priority order
    pub fn iter(&self) -> impl Iterator<Item = &SelectorTemplate> + '_ {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    /// Distinct placeholder names across all templates
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for name in self.iter().flat_map(SelectorTemplate::placeholders) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// The raw patterns as a selector list
    #[must_use]
    pub fn to_list(&self) -> SelectorList {
        SelectorList::new(
            self.primary.spec(),
            self.fallbacks.iter().map(SelectorTemplate::spec),
        )
    }

    /// Render every template with `params`
    pub fn render(&self, params: &[(&str, &str)]) -> HarvesterResult<SelectorList> {
        let primary = self.primary.render(params)?;
        let fallbacks = self
            .fallbacks
            .iter()
            .map(|template| template.render(params))
            .collect::<HarvesterResult<Vec<_>>>()?;
        Ok(SelectorList::new(primary, fallbacks))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod strategy_tests {
        use super::*;

        #[test]
        fn test_parse_strategy_tags() {
            assert_eq!("xpath".parse::<Strategy>().unwrap(), Strategy::XPath);
            assert_eq!("CSS".parse::<Strategy>().unwrap(), Strategy::Css);
            assert_eq!(" css ".parse::<Strategy>().unwrap(), Strategy::Css);
        }

        #[test]
        fn test_unknown_strategy() {
            let err = "id".parse::<Strategy>().unwrap_err();
            assert!(matches!(err, HarvesterError::UnknownStrategy { tag } if tag == "id"));
        }

        #[test]
        fn test_strategy_display_round_trips() {
            for strategy in [Strategy::XPath, Strategy::Css] {
                assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
            }
        }
    }

    mod spec_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = SelectorSpec::css("div.fileBox").to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("div.fileBox"));
        }

        #[test]
        fn test_xpath_query() {
            let query = SelectorSpec::xpath("//h4[normalize-space(.)='Resources']").to_query();
            assert!(query.contains("document.evaluate"));
            assert!(query.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn test_display() {
            assert_eq!(SelectorSpec::css("video").to_string(), "css=video");
        }
    }

    mod list_tests {
        use super::*;

        #[test]
        fn test_order_preserved() {
            let list = SelectorList::new(
                SelectorSpec::xpath("//a"),
                [SelectorSpec::xpath("//b"), SelectorSpec::css("c")],
            );
            let patterns: Vec<_> = list.iter().map(SelectorSpec::pattern).collect();
            assert_eq!(patterns, ["//a", "//b", "c"]);
            assert_eq!(list.len(), 3);
            assert_eq!(list.primary().pattern(), "//a");
        }

        #[test]
        fn test_empty_vec_rejected() {
            let err = SelectorList::try_from(Vec::new()).unwrap_err();
            assert!(matches!(err, HarvesterError::EmptySelectorList));
        }

        #[test]
        fn test_deserialize_rejects_empty() {
            assert!(serde_json::from_str::<SelectorList>("[]").is_err());
            let list: SelectorList =
                serde_json::from_str(r#"[{"strategy":"css","pattern":"video"}]"#).unwrap();
            assert_eq!(list, SelectorList::single(SelectorSpec::css("video")));
        }

        #[test]
        fn test_display() {
            let list = SelectorList::new(SelectorSpec::css("a"), [SelectorSpec::xpath("//b")]);
            assert_eq!(list.to_string(), "[css=a, xpath=//b]");
        }
    }

    mod template_tests {
        use super::*;

        const CARD: SelectorTemplate = SelectorTemplate::xpath(
            "//span[normalize-space(.)='{course_code}']/ancestor::div[contains(@class, '{course_code}-card')][1]",
        );

        #[test]
        fn test_placeholders_deduplicated() {
            assert_eq!(CARD.placeholders(), ["course_code"]);
        }

        #[test]
        fn test_render_substitutes_every_occurrence() {
            let spec = CARD.render(&[("course_code", "LA103")]).unwrap();
            assert_eq!(
                spec.pattern(),
                "//span[normalize-space(.)='LA103']/ancestor::div[contains(@class, 'LA103-card')][1]"
            );
            assert_eq!(spec.strategy(), Strategy::XPath);
        }

        #[test]
        fn test_render_missing_value() {
            let err = CARD.render(&[("group_name", "x")]).unwrap_err();
            assert!(
                matches!(err, HarvesterError::TemplateError { placeholder, .. } if placeholder == "course_code")
            );
        }

        #[test]
        fn test_non_placeholder_braces_are_literal() {
            let template = SelectorTemplate::css("div[data-x='{ not a name }'] {x}");
            assert_eq!(template.placeholders(), ["x"]);
            let spec = template.render(&[("x", "y")]).unwrap();
            assert_eq!(spec.pattern(), "div[data-x='{ not a name }'] y");
        }

        #[test]
        fn test_template_list_render() {
            const LIST: TemplateList = TemplateList::new(
                SelectorTemplate::xpath("//p[.='{title}']"),
                &[SelectorTemplate::css("p.{kind}")],
            );
            assert_eq!(LIST.placeholders(), ["title", "kind"]);
            let list = LIST.render(&[("title", "Resources"), ("kind", "name")]).unwrap();
            assert_eq!(list.to_string(), "[xpath=//p[.='Resources'], css=p.name]");
            assert!(LIST.render(&[("title", "Resources")]).is_err());
        }

        #[test]
        fn test_to_list_keeps_raw_patterns() {
            let list = TemplateList::single(CARD).to_list();
            assert_eq!(list.primary().pattern(), CARD.pattern());
        }
    }
}

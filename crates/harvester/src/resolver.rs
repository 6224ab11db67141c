//! Locator resolution over fallback lists.
//!
//! ```text
//! SelectorList ──► resolve() ──► Document::query(spec[0]) ── match ──► element
//!                                      │ miss
//!                                      ▼
//!                               Document::query(spec[1]) ── match ──► element
//!                                      │ miss
//!                                      ▼
//!                                     ...  ──► ElementNotFound { selectors }
//! ```
//!
//! The resolver never retries or waits. Poll and timeout policy belongs to
//! the caller driving the page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::result::{HarvesterError, HarvesterResult};
use crate::selector::{SelectorList, SelectorSpec};

/// A live, queryable page representation.
///
/// Implementations run one selector against the page and report the first
/// matching element, or `None` when nothing matches or the strategy is not
/// supported. Queries must be read-only.
pub trait Document {
    /// Handle type returned for a matched element
    type Element;

    /// Run a single selector against the document
    fn query(&self, selector: &SelectorSpec) -> Option<Self::Element>;
}

impl<D: Document + ?Sized> Document for &D {
    type Element = D::Element;

    fn query(&self, selector: &SelectorSpec) -> Option<Self::Element> {
        (**self).query(selector)
    }
}

/// Element handle for DOM snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Element tag name (lowercase)
    pub tag_name: String,
    /// `id` attribute, if any
    pub id: Option<String>,
    /// Whitespace-normalized text content, if non-empty
    pub text_content: Option<String>,
    /// All attributes by name
    pub attributes: BTreeMap<String, String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            id: None,
            text_content: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Get an attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A successful resolution with the position of the winning selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<E> {
    /// The matched element
    pub element: E,
    /// Position of the matching selector (0 = preferred)
    pub index: usize,
    /// The matching selector
    pub selector: SelectorSpec,
}

impl<E> Resolved<E> {
    /// Whether a fallback rather than the preferred selector matched
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        self.index > 0
    }
}

/// Resolve the first selector in `selectors` that matches `document`.
///
/// Entries after the first match are never queried.
///
/// # Errors
///
/// Returns [`HarvesterError::ElementNotFound`] carrying the whole list when no
/// entry matches.
pub fn resolve<D>(document: &D, selectors: &SelectorList) -> HarvesterResult<D::Element>
where
    D: Document + ?Sized,
{
    resolve_indexed(document, selectors).map(|resolved| resolved.element)
}

/// Like [`resolve`], also reporting which selector matched.
pub fn resolve_indexed<D>(
    document: &D,
    selectors: &SelectorList,
) -> HarvesterResult<Resolved<D::Element>>
where
    D: Document + ?Sized,
{
    for (index, selector) in selectors.iter().enumerate() {
        trace!(index, %selector, "querying selector");
        if let Some(element) = document.query(selector) {
            if index == 0 {
                debug!(%selector, "matched preferred selector");
            } else {
                warn!(
                    index,
                    %selector,
                    preferred = %selectors.primary(),
                    "matched fallback selector; page markup may have changed"
                );
            }
            return Ok(Resolved {
                element,
                index,
                selector: selector.clone(),
            });
        }
    }

    debug!(attempted = selectors.len(), "no selector matched");
    Err(HarvesterError::ElementNotFound {
        selectors: selectors.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Document answering from a fixed table and recording every query
    #[derive(Default)]
    struct RecordingDocument {
        elements: HashMap<SelectorSpec, ElementHandle>,
        queries: RefCell<Vec<SelectorSpec>>,
    }

    impl RecordingDocument {
        fn with(mut self, selector: SelectorSpec, element: ElementHandle) -> Self {
            let _ = self.elements.insert(selector, element);
            self
        }

        fn queried(&self) -> Vec<SelectorSpec> {
            self.queries.borrow().clone()
        }
    }

    impl Document for RecordingDocument {
        type Element = ElementHandle;

        fn query(&self, selector: &SelectorSpec) -> Option<ElementHandle> {
            self.queries.borrow_mut().push(selector.clone());
            self.elements.get(selector).cloned()
        }
    }

    fn login_buttons() -> SelectorList {
        SelectorList::new(
            SelectorSpec::xpath("//button[normalize-space(.)='Login']"),
            [
                SelectorSpec::xpath("//button[normalize-space(.)='Sign In']"),
                SelectorSpec::xpath("//button[@type='submit']"),
            ],
        )
    }

    fn numbered_list(len: usize) -> SelectorList {
        let specs: Vec<_> = (0..len)
            .map(|i| SelectorSpec::css(format!("#candidate-{i}")))
            .collect();
        SelectorList::try_from(specs).unwrap()
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_preferred_selector_wins() {
            let list = login_buttons();
            let doc = RecordingDocument::default()
                .with(list.primary().clone(), ElementHandle::new("button").with_text("Login"))
                .with(
                    SelectorSpec::xpath("//button[@type='submit']"),
                    ElementHandle::new("button").with_text("Submit"),
                );

            let resolved = resolve_indexed(&doc, &list).unwrap();
            assert_eq!(resolved.index, 0);
            assert!(!resolved.used_fallback());
            assert_eq!(resolved.element.text_content.as_deref(), Some("Login"));
            assert_eq!(doc.queried().len(), 1);
        }

        #[test]
        fn test_fallback_used_when_preferred_missing() {
            let list = login_buttons();
            let submit = SelectorSpec::xpath("//button[@type='submit']");
            let doc = RecordingDocument::default()
                .with(submit.clone(), ElementHandle::new("button").with_text("Go"));

            let resolved = resolve_indexed(&doc, &list).unwrap();
            assert_eq!(resolved.index, 2);
            assert!(resolved.used_fallback());
            assert_eq!(resolved.selector, submit);
            assert_eq!(doc.queried(), list.iter().cloned().collect::<Vec<_>>());
        }

        #[test]
        fn test_no_match_reports_full_list() {
            let list = login_buttons();
            let doc = RecordingDocument::default();

            let err = resolve(&doc, &list).unwrap_err();
            match err {
                HarvesterError::ElementNotFound { selectors } => assert_eq!(selectors, list),
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(doc.queried().len(), 3);
        }

        #[test]
        fn test_resolve_through_reference() {
            let list = SelectorList::single(SelectorSpec::css("video"));
            let doc = RecordingDocument::default()
                .with(SelectorSpec::css("video"), ElementHandle::new("video"));
            let by_ref: &RecordingDocument = &doc;
            assert_eq!(resolve(&by_ref, &list).unwrap().tag_name, "video");
        }
    }

    proptest! {
        /// The first matching position wins and nothing after it is queried
        #[test]
        fn prop_first_match_short_circuits(len in 1usize..16, offset in 0usize..16) {
            let list = numbered_list(len);
            let first_match = offset % len;
            let mut doc = RecordingDocument::default();
            for (i, spec) in list.iter().enumerate().skip(first_match) {
                doc = doc.with(spec.clone(), ElementHandle::new(format!("el{i}")));
            }

            let resolved = resolve_indexed(&doc, &list).unwrap();
            prop_assert_eq!(resolved.index, first_match);
            let expected_tag = format!("el{first_match}");
            prop_assert_eq!(resolved.element.tag_name, expected_tag);
            prop_assert_eq!(doc.queried().len(), first_match + 1);
        }

        /// With no matches every entry is tried once and the error carries the list
        #[test]
        fn prop_no_match_tries_everything(len in 1usize..16) {
            let list = numbered_list(len);
            let doc = RecordingDocument::default();

            let err = resolve(&doc, &list).unwrap_err();
            let reported = match err {
                HarvesterError::ElementNotFound { selectors } => selectors,
                other => return Err(TestCaseError::fail(format!("unexpected error: {other}"))),
            };
            prop_assert_eq!(reported, list.clone());
            prop_assert_eq!(doc.queried(), list.iter().cloned().collect::<Vec<_>>());
        }
    }
}

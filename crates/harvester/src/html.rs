//! HTML snapshot document.
//!
//! Resolves selector lists against a saved page (e.g. the page source
//! dumped next to an error screenshot). CSS entries run against a `scraper`
//! tree and XPath entries against an `sxd` tree of the same source.

use std::fmt;
use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html};
use sxd_document::{dom, Package};
use sxd_xpath::{nodeset::Node, Value};
use tracing::trace;

use crate::resolver::{Document, ElementHandle};
use crate::result::HarvesterResult;
use crate::selector::{SelectorSpec, Strategy};

/// A parsed HTML page
pub struct HtmlDocument {
    html: Html,
    tree: Package,
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("html", &self.html)
            .finish_non_exhaustive()
    }
}

impl HtmlDocument {
    /// Parse a full HTML document
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            tree: sxd_html::parse_html(source),
        }
    }

    /// Read and parse an HTML file
    pub fn from_file(path: impl AsRef<Path>) -> HarvesterResult<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }

    /// Number of elements matching a CSS selector; 0 for invalid selectors
    #[must_use]
    pub fn count(&self, css: &str) -> usize {
        scraper::Selector::parse(css).map_or(0, |selector| self.html.select(&selector).count())
    }
}

impl Document for HtmlDocument {
    type Element = ElementHandle;

    fn query(&self, selector: &SelectorSpec) -> Option<ElementHandle> {
        match selector.strategy() {
            Strategy::Css => {
                let parsed = match scraper::Selector::parse(selector.pattern()) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        trace!(%selector, error = %err, "invalid css selector");
                        return None;
                    }
                };
                self.html.select(&parsed).next().map(to_handle)
            }
            Strategy::XPath => {
                let document = self.tree.as_document();
                let result = sxd_xpath::evaluate_xpath(&document, selector.pattern());
                match result {
                    Ok(Value::Nodeset(nodes)) => match nodes.document_order_first() {
                        Some(Node::Element(element)) => Some(xpath_handle(element)),
                        Some(_) => {
                            trace!(%selector, "xpath matched a non-element node");
                            None
                        }
                        None => None,
                    },
                    Ok(_) => {
                        trace!(%selector, "xpath did not select nodes");
                        None
                    }
                    Err(err) => {
                        trace!(%selector, error = %err, "invalid xpath");
                        None
                    }
                }
            }
        }
    }
}

fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> Option<String> {
    let text = parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Descendant text nodes in document order
fn text_nodes<'d>(element: dom::Element<'d>, out: &mut Vec<&'d str>) {
    for child in element.children() {
        match child {
            dom::ChildOfElement::Element(inner) => text_nodes(inner, out),
            dom::ChildOfElement::Text(text) => out.push(text.text()),
            _ => {}
        }
    }
}

fn xpath_handle(element: dom::Element<'_>) -> ElementHandle {
    let mut texts = Vec::new();
    text_nodes(element, &mut texts);

    ElementHandle {
        tag_name: element.name().local_part().to_string(),
        id: element.attribute_value("id").map(str::to_string),
        text_content: normalize_text(texts.into_iter()),
        attributes: element
            .attributes()
            .into_iter()
            .map(|attr| (attr.name().local_part().to_string(), attr.value().to_string()))
            .collect(),
    }
}

fn to_handle(element: ElementRef<'_>) -> ElementHandle {
    let value = element.value();

    ElementHandle {
        tag_name: value.name().to_string(),
        id: value.id().map(str::to_string),
        text_content: normalize_text(element.text()),
        attributes: value
            .attrs()
            .map(|(name, val)| (name.to_string(), val.to_string()))
            .collect(),
    }
}

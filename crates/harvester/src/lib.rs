//! Harvester: resilient element location and configuration for an LMS
//! resource harvester.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        HARVESTER core                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  catalog ──► SelectorList ──► resolve() ──► Document (trait)      │
//! │  (named,       (ordered,       first match     ├─ HtmlDocument    │
//! │   templates)    non-empty)     wins            └─ your driver     │
//! │                                                                  │
//! │  Settings::load()  ──►  passed by reference to every component   │
//! │  CourseCatalog     ──►  code → group / display name              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use harvester::prelude::*;
//!
//! let page = HtmlDocument::parse(r#"<div id="gtm-IdDashboard">Hi</div>"#);
//! let element = resolve(&page, &catalog::dashboard::indicator())?;
//! assert_eq!(element.id.as_deref(), Some("gtm-IdDashboard"));
//! # Ok::<(), HarvesterError>(())
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod courses;
mod html;
mod resolver;
mod result;
mod selector;
pub mod settings;

pub use courses::{CourseCatalog, CourseEntry};
pub use html::HtmlDocument;
pub use resolver::{resolve, resolve_indexed, Document, ElementHandle, Resolved};
pub use result::{HarvesterError, HarvesterResult};
pub use selector::{SelectorList, SelectorSpec, SelectorTemplate, Strategy, TemplateList};
pub use settings::Settings;

/// Commonly used items
pub mod prelude {
    pub use super::catalog;
    pub use super::courses::{CourseCatalog, CourseEntry};
    pub use super::html::HtmlDocument;
    pub use super::resolver::{resolve, resolve_indexed, Document, ElementHandle, Resolved};
    pub use super::result::{HarvesterError, HarvesterResult};
    pub use super::selector::{
        SelectorList, SelectorSpec, SelectorTemplate, Strategy, TemplateList,
    };
    pub use super::settings::Settings;
}

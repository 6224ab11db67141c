//! Selector catalog for the coaching portal.
//!
//! Each logical target on the portal is a [`TemplateList`] grouped by page,
//! in the manner of a page object. Static targets expose a function
//! returning a ready [`SelectorList`]; targets that depend on a course,
//! group or section take that value and render their templates.
//!
//! All targets are also registered by dotted name in [`NAMED`] so tools can
//! look them up at runtime (see [`named`]).

use crate::result::{HarvesterError, HarvesterResult};
use crate::selector::{SelectorList, SelectorTemplate as T, TemplateList};

/// Portal login page
pub const LOGIN_URL: &str = "https://coach.tetr.com/login";

/// Portal root
pub const BASE_URL: &str = "https://coach.tetr.com/";

/// Course listing page
pub const COURSES_URL: &str = "https://coach.tetr.com/courses";

/// Where a persisted browser session (cookies, storage) is kept
pub const AUTH_STATE_FILE: &str = "data/auth_state.json";

/// Login page targets
pub mod login {
    use super::{SelectorList, TemplateList, T};

    /// Email input
    pub const USERNAME: TemplateList = TemplateList::new(
        T::xpath("//input[@placeholder='Enter Your Email ID']"),
        &[T::xpath("//input[@name='officialEmail']")],
    );

    /// Password input
    pub const PASSWORD: TemplateList = TemplateList::new(
        T::xpath("//input[@placeholder='Enter Your Password']"),
        &[T::xpath("//input[@name='password']")],
    );

    /// Submit button
    pub const SUBMIT: TemplateList = TemplateList::new(
        T::xpath("//button[normalize-space(.)='Login']"),
        &[
            T::xpath("//button[normalize-space(.)='Sign In']"),
            T::xpath("//button[@type='submit']"),
        ],
    );

    /// Email input selectors
    #[must_use]
    pub fn username() -> SelectorList {
        USERNAME.to_list()
    }

    /// Password input selectors
    #[must_use]
    pub fn password() -> SelectorList {
        PASSWORD.to_list()
    }

    /// Submit button selectors
    #[must_use]
    pub fn submit() -> SelectorList {
        SUBMIT.to_list()
    }
}

/// Post-login landing page
pub mod dashboard {
    use super::{SelectorList, TemplateList, T};

    /// Present only once the session is past the login page
    pub const INDICATOR: TemplateList = TemplateList::single(T::css("#gtm-IdDashboard"));

    /// Dashboard indicator selectors
    #[must_use]
    pub fn indicator() -> SelectorList {
        INDICATOR.to_list()
    }
}

/// Course listing page
pub mod courses {
    use super::{HarvesterResult, SelectorList, TemplateList, T};

    /// `div.domainHeader` holding a `p.title` equal to `{group_name}`
    pub const GROUP_HEADER: TemplateList = TemplateList::single(T::xpath(
        "//p[contains(@class, 'title') and normalize-space(.)='{group_name}']/ancestor::div[contains(@class, 'domainHeader')][1]",
    ));

    /// Card for `{course_code}`; the second form covers layouts where the
    /// code sits in nested divs under an anchor wrapper
    pub const COURSE_CARD: TemplateList = TemplateList::new(
        T::xpath(
            "//span[contains(@class, 'pIdName') and normalize-space(.)='{course_code}']/ancestor::div[contains(@class, 'sc-eDWCr')][1]",
        ),
        &[T::xpath(
            "//span[contains(concat(' ', normalize-space(@class), ' '), ' pIdName ') and normalize-space(.)='{course_code}']/ancestor::div[contains(@class, 'sc-eDWCr') or contains(@class, 'domainCourses')][1]",
        )],
    );

    /// Group header selectors for `group_name`
    pub fn group_header(group_name: &str) -> HarvesterResult<SelectorList> {
        GROUP_HEADER.render(&[("group_name", group_name)])
    }

    /// Course card selectors for `course_code`
    pub fn course_card(course_code: &str) -> HarvesterResult<SelectorList> {
        COURSE_CARD.render(&[("course_code", course_code)])
    }
}

/// Course details page, resources tab
pub mod resources {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use super::{HarvesterResult, SelectorList, TemplateList, T};

    /// The "Resources" tab in the course navigation
    pub const TAB: TemplateList = TemplateList::new(
        T::xpath(
            "//div[.//img[contains(@src, 'resources.svg')] and .//p[normalize-space(.)='Resources']]",
        ),
        &[
            T::xpath("//p[normalize-space(.)='Resources']/ancestor::div[contains(@class, 'sc-kMjNwy')][1]"),
            T::xpath("//p[normalize-space(.)='Resources']/ancestor::li[1]"),
            T::xpath("//h4[normalize-space(.)='Resources']"),
        ],
    );

    /// Section header titled `{section_title}`
    pub const SECTION_HEADER: TemplateList = TemplateList::single(T::xpath(
        "//p[contains(@class, 'name') and normalize-space(.)='{section_title}']",
    ));

    /// One resource entry
    pub const ITEM: TemplateList = TemplateList::single(T::css("div.fileBox"));

    /// Title inside a resource entry
    pub const ITEM_TITLE: TemplateList = TemplateList::single(T::css("div.fileContentCol p"));

    /// Date inside a resource entry
    pub const ITEM_DATE: TemplateList = TemplateList::single(T::css("div.fileContentCol span"));

    /// Resource sections shown on the tab
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Section {
        /// Material to read before class
        PreRead,
        /// Material used during class
        InClass,
        /// Follow-up material
        PostClass,
        /// Recorded sessions (transcript sources)
        SessionRecordings,
    }

    impl Section {
        /// Every section in display order
        pub const ALL: [Self; 4] = [
            Self::PreRead,
            Self::InClass,
            Self::PostClass,
            Self::SessionRecordings,
        ];

        /// Header text on the page
        #[must_use]
        pub const fn title(self) -> &'static str {
            match self {
                Self::PreRead => "Pre-Read Materials",
                Self::InClass => "In Class Materials",
                Self::PostClass => "Post Class Materials",
                Self::SessionRecordings => "Session Recordings",
            }
        }

        /// Section whose header text is `title`
        #[must_use]
        pub fn from_title(title: &str) -> Option<Self> {
            Self::ALL.into_iter().find(|s| s.title() == title.trim())
        }
    }

    impl fmt::Display for Section {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.title())
        }
    }

    /// Resources tab selectors
    #[must_use]
    pub fn tab() -> SelectorList {
        TAB.to_list()
    }

    /// Header selectors for a section
    pub fn section_header(section: Section) -> HarvesterResult<SelectorList> {
        SECTION_HEADER.render(&[("section_title", section.title())])
    }

    /// Resource entry selectors
    #[must_use]
    pub fn item() -> SelectorList {
        ITEM.to_list()
    }

    /// Resource title selectors
    #[must_use]
    pub fn item_title() -> SelectorList {
        ITEM_TITLE.to_list()
    }

    /// Resource date selectors
    #[must_use]
    pub fn item_date() -> SelectorList {
        ITEM_DATE.to_list()
    }
}

/// Google Drive web viewer
pub mod drive {
    use super::{TemplateList, T};

    /// Video play button
    pub const PLAY_BUTTON: TemplateList =
        TemplateList::single(T::css("button[jsname='IGlMSc'], button[jsname='dW8tsb']"));

    /// Player settings button
    pub const SETTINGS_BUTTON: TemplateList =
        TemplateList::single(T::css("button[jsname='dq27Te'], button[jsname='J7HKb']"));

    /// Transcript panel heading
    pub const TRANSCRIPT_HEADING: TemplateList = TemplateList::single(T::css("h2#ucc-0"));

    /// Transcript panel
    pub const TRANSCRIPT_CONTAINER: TemplateList =
        TemplateList::single(T::css("div[jsname='h7hTqc']"));

    /// One transcript segment
    pub const TRANSCRIPT_SEGMENT: TemplateList = TemplateList::single(T::css(
        "div.JnEIz div.wyBDIb, div[jsname='h7hTqc'] div.wyBDIb",
    ));
}

/// Zoom web viewer
pub mod zoom {
    use super::{TemplateList, T};

    /// Transcript panel
    pub const TRANSCRIPT_CONTAINER: TemplateList =
        TemplateList::single(T::css("div.transcript-container"));

    /// Transcript list
    pub const TRANSCRIPT_LIST: TemplateList = TemplateList::single(T::css("ul.transcript-list"));

    /// Transcript text lines
    pub const TRANSCRIPT_TEXT: TemplateList = TemplateList::single(T::css("div.timeline div.text"));

    /// Player surface to click so the viewer loads the transcript
    pub const INITIAL_INTERACTION: TemplateList = TemplateList::new(
        T::css("video"),
        &[
            T::css("div.player-container"),
            T::css("div#player"),
            T::css("div.playback-video"),
            T::css("canvas"),
        ],
    );
}

/// A catalog entry addressable by name
#[derive(Debug, Clone, Copy)]
pub struct NamedSelectors {
    /// Dotted name, `page.target`
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// The templates
    pub templates: TemplateList,
}

impl NamedSelectors {
    /// Placeholders the caller must supply to [`Self::render`]
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.templates.placeholders()
    }

    /// Render into a selector list
    pub fn render(&self, params: &[(&str, &str)]) -> HarvesterResult<SelectorList> {
        self.templates.render(params)
    }
}

const fn entry(
    name: &'static str,
    description: &'static str,
    templates: TemplateList,
) -> NamedSelectors {
    NamedSelectors {
        name,
        description,
        templates,
    }
}

/// Every catalog target, in page order
pub const NAMED: &[NamedSelectors] = &[
    entry("login.username", "Email input", login::USERNAME),
    entry("login.password", "Password input", login::PASSWORD),
    entry("login.submit", "Login button", login::SUBMIT),
    entry("dashboard.indicator", "Present once logged in", dashboard::INDICATOR),
    entry("courses.group_header", "Course group header", courses::GROUP_HEADER),
    entry("courses.course_card", "Course card by code", courses::COURSE_CARD),
    entry("resources.tab", "Resources tab", resources::TAB),
    entry("resources.section_header", "Resource section header", resources::SECTION_HEADER),
    entry("resources.item", "Resource entry", resources::ITEM),
    entry("resources.item_title", "Resource title", resources::ITEM_TITLE),
    entry("resources.item_date", "Resource date", resources::ITEM_DATE),
    entry("drive.play_button", "Drive player play button", drive::PLAY_BUTTON),
    entry("drive.settings_button", "Drive player settings button", drive::SETTINGS_BUTTON),
    entry("drive.transcript_heading", "Drive transcript heading", drive::TRANSCRIPT_HEADING),
    entry("drive.transcript_container", "Drive transcript panel", drive::TRANSCRIPT_CONTAINER),
    entry("drive.transcript_segment", "Drive transcript segment", drive::TRANSCRIPT_SEGMENT),
    entry("zoom.transcript_container", "Zoom transcript panel", zoom::TRANSCRIPT_CONTAINER),
    entry("zoom.transcript_list", "Zoom transcript list", zoom::TRANSCRIPT_LIST),
    entry("zoom.transcript_text", "Zoom transcript lines", zoom::TRANSCRIPT_TEXT),
    entry("zoom.initial_interaction", "Zoom player surface", zoom::INITIAL_INTERACTION),
];

/// Look up a catalog target by name
pub fn named(name: &str) -> HarvesterResult<&'static NamedSelectors> {
    NAMED
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| HarvesterError::UnknownSelector {
            name: name.to_string(),
        })
}

use std::borrow::Cow;

use url::{form_urlencoded, Url};

pub const FORCE_ANIM_PARAM: &str = "forceAnim";

/// Page-load overrides read from the URL query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Show animated content before the loader finishes; used for
    /// screenshots and visual testing.
    pub force_anim: bool,
}

impl LaunchOptions {
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Accepts a raw query with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<'a>(
        mut pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    ) -> Self {
        let force_anim = pairs
            .find(|(key, _)| key == FORCE_ANIM_PARAM)
            .is_some_and(|(_, value)| value == "1");
        Self { force_anim }
    }

    pub fn effective_content_can_animate(&self, loader_content_can_animate: bool) -> bool {
        loader_content_can_animate || self.force_anim
    }
}

#[cfg(test)]
#[path = "tests/launch_tests.rs"]
mod tests;

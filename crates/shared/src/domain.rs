use serde::{Deserialize, Serialize};

/// Top-level content panels, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    About,
    Portfolio,
    Skills,
    Contact,
}

pub const SECTIONS: [SectionId; 4] = [
    SectionId::About,
    SectionId::Portfolio,
    SectionId::Skills,
    SectionId::Contact,
];

impl SectionId {
    pub fn anchor(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Portfolio => "portfolio",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::About => "About Me",
            Self::Portfolio => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        SECTIONS
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        SECTIONS.get(index).copied()
    }

    /// Resolves a nav link such as `#skills`; the leading `#` is optional.
    pub fn from_href(href: &str) -> Option<Self> {
        let anchor = href.strip_prefix('#').unwrap_or(href);
        SECTIONS
            .iter()
            .copied()
            .find(|section| section.anchor() == anchor)
    }
}

/// Contact form inputs. Declaration order is focus priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];
}

/// Cosmetic corner-frame / cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationState {
    Active,
    Rest,
    AboutFrame,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Theme applied before first paint: a valid stored preference wins,
    /// otherwise the colour-scheme media query decides.
    pub fn resolve_boot(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored.and_then(Self::parse) {
            Some(theme) => theme,
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;

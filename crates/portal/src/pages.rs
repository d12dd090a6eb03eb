//! Portal pages and navigation targets.

use std::fmt;

use serde::Serialize;

/// A page of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Landing page with feature cards, quick actions and the ticker.
    Home,
    /// Login and registration forms.
    Login,
    /// Leave request form.
    Leave,
    /// Document upload and library.
    Upload,
}

impl Page {
    /// All pages.
    pub const ALL: [Self; 4] = [Self::Home, Self::Login, Self::Leave, Self::Upload];

    /// File name of the page in the static site.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Login => "auth.html",
            Self::Leave => "leave.html",
            Self::Upload => "upload.html",
        }
    }

    /// Returns the lowercase name of the page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Leave => "leave",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" | "index" | "index.html" => Ok(Self::Home),
            "login" | "auth" | "auth.html" => Ok(Self::Login),
            "leave" | "leave.html" => Ok(Self::Leave),
            "upload" | "upload.html" => Ok(Self::Upload),
            _ => Err(format!("unknown page: {s}")),
        }
    }
}

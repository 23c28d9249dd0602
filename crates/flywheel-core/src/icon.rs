//! Menu Icons
//!
//! Backend menu nodes name their icon with a string key. Unknown keys fall
//! back to the document icon.

use serde::{Deserialize, Serialize};

/// Icon shown next to a team or menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Icon {
    Brain,
    ChartPie,
    Briefcase,
    Server,
    Users,
    Settings,
    User,
    #[default]
    FileText,
}

impl Icon {
    /// Resolve a backend icon key (surrounding whitespace ignored)
    pub fn resolve(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("icon-strategy") => Icon::Brain,
            Some("icon-fundation") => Icon::ChartPie,
            Some("icon-manage") => Icon::Briefcase,
            Some("icon-tech") => Icon::Server,
            Some("icon-customer") => Icon::Users,
            Some("icon-setting") | Some("icon-system") => Icon::Settings,
            Some("icon-user") => Icon::User,
            _ => Icon::FileText,
        }
    }

    /// CSS class for the icon font
    pub fn css_class(&self) -> &'static str {
        match self {
            Icon::Brain => "icon icon-brain",
            Icon::ChartPie => "icon icon-chart-pie",
            Icon::Briefcase => "icon icon-briefcase",
            Icon::Server => "icon icon-server",
            Icon::Users => "icon icon-users",
            Icon::Settings => "icon icon-settings",
            Icon::User => "icon icon-user",
            Icon::FileText => "icon icon-file-text",
        }
    }

    /// Text fallback when the icon font is missing
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Brain => "🧠",
            Icon::ChartPie => "◔",
            Icon::Briefcase => "💼",
            Icon::Server => "🖥",
            Icon::Users => "👥",
            Icon::Settings => "⚙",
            Icon::User => "👤",
            Icon::FileText => "📄",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_trimmed() {
        assert_eq!(Icon::resolve(Some("icon-tech")), Icon::Server);
        assert_eq!(Icon::resolve(Some("  icon-user ")), Icon::User);
        assert_eq!(Icon::resolve(Some("icon-system")), Icon::Settings);
    }

    #[test]
    fn test_resolve_unknown_is_default() {
        assert_eq!(Icon::resolve(None), Icon::FileText);
        assert_eq!(Icon::resolve(Some("")), Icon::FileText);
        assert_eq!(Icon::resolve(Some("icon-rocket")), Icon::FileText);
    }
}

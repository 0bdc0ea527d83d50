use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Arrow,
    Watch,
    Project,
    /// Source to output
    To,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            match self {
                Icon::Success => theme::icons::SUCCESS,
                Icon::Error => theme::icons::ERROR,
                Icon::Warning => theme::icons::WARNING,
                Icon::Progress => theme::icons::PROGRESS,
                Icon::Pending => theme::icons::PENDING,
                Icon::Arrow => theme::icons::ARROW,
                Icon::Watch => theme::icons::WATCH,
                Icon::Project => theme::icons::PROJECT,
                Icon::To => theme::icons::TO,
            }
        } else {
            match self {
                Icon::Success => theme::icons_ascii::SUCCESS,
                Icon::Error => theme::icons_ascii::ERROR,
                Icon::Warning => theme::icons_ascii::WARNING,
                Icon::Progress => theme::icons_ascii::PROGRESS,
                Icon::Pending => theme::icons_ascii::PENDING,
                Icon::Arrow => theme::icons_ascii::ARROW,
                Icon::Watch => theme::icons_ascii::WATCH,
                Icon::Project => theme::icons_ascii::PROJECT,
                Icon::To => theme::icons_ascii::TO,
            }
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Pending | Icon::Arrow | Icon::To => theme::colors::DIM,
            Icon::Watch | Icon::Project => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_fallback_for_every_icon() {
        assert_eq!(Icon::Success.render(false), "[OK]");
        assert_eq!(Icon::Watch.render(false), "[~]");
        assert_eq!(Icon::To.render(false), "->");
    }

    #[test]
    fn uncolored_icon_has_no_escape_codes() {
        assert_eq!(Icon::Error.colored(false, true), theme::icons::ERROR);
        assert!(Icon::Error.colored(true, true).contains("\u{1b}["));
    }
}

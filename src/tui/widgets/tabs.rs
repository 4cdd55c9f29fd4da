//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Available tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Insights,
    Staff,
    Services,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Insights => "Insights",
            Self::Staff => "Staff",
            Self::Services => "Services",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[Tab::Insights, Tab::Staff, Tab::Services]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Insights => Self::Staff,
            Self::Staff => Self::Services,
            Self::Services => Self::Insights,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Insights => Self::Services,
            Self::Staff => Self::Insights,
            Self::Services => Self::Staff,
        }
    }

    /// Get tab from number key (1-3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Insights),
            2 => Some(Self::Staff),
            3 => Some(Self::Services),
            _ => None,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn display(tab: Tab, selected: bool) -> String {
        if selected {
            format!("[{}]", tab.label())
        } else {
            tab.label().to_string()
        }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| Self::display(*tab, *tab == self.selected).len() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let display = Self::display(*tab, is_selected);

            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_all() {
        let all = Tab::all();
        assert_eq!(all, &[Tab::Insights, Tab::Staff, Tab::Services]);
    }

    #[test]
    fn test_tab_next_prev_wrap() {
        assert_eq!(Tab::Insights.next(), Tab::Staff);
        assert_eq!(Tab::Services.next(), Tab::Insights);
        assert_eq!(Tab::Insights.prev(), Tab::Services);
        assert_eq!(Tab::Staff.prev(), Tab::Insights);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Insights));
        assert_eq!(Tab::from_number(3), Some(Tab::Services));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(4), None);
    }

    #[test]
    fn test_tab_bar_marks_selected() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        TabBar::new(Tab::Staff, Theme::Dark).render(area, &mut buf);

        let rendered: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("[Staff]"));
        assert!(rendered.contains("Insights"));
        assert!(!rendered.contains("[Insights]"));
    }
}

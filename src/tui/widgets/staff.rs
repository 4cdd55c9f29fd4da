//! Staff view widget - active and inactive team members

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::insights::render_separator;
use super::tabs::{Tab, TabBar};
use crate::format::truncate_name;
use crate::services::StaffDirectory;
use crate::tui::theme::Theme;
use crate::types::StaffMember;

const MAX_CONTENT_WIDTH: u16 = 120;

/// Staff view widget
pub struct StaffView<'a> {
    directory: &'a StaffDirectory<'a>,
    scroll: usize,
    theme: Theme,
}

impl<'a> StaffView<'a> {
    pub fn new(directory: &'a StaffDirectory<'a>, scroll: usize, theme: Theme) -> Self {
        Self {
            directory,
            scroll,
            theme,
        }
    }

    /// Total rendered lines (section headers + members + gap)
    pub fn line_count(directory: &StaffDirectory<'_>) -> usize {
        directory.active.len() + directory.inactive.len() + 3
    }

    fn member_line(&self, member: &StaffMember, active: bool) -> Line<'static> {
        let specialties = if member.specialties.is_empty() {
            "-".to_string()
        } else {
            member.specialties.join(", ")
        };
        let contact = [member.email.as_str(), member.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");

        Line::from(vec![
            Span::styled(
                format!("  {:<24}", truncate_name(&member.name, 22)),
                Style::default().fg(self.theme.staff_status(active)),
            ),
            Span::styled(
                format!("{:<36}", truncate_name(&specialties, 34)),
                Style::default().fg(self.theme.text()),
            ),
            Span::styled(
                format!("★ {:.1}  ", member.rating),
                Style::default().fg(self.theme.heading()),
            ),
            Span::styled(contact, Style::default().fg(self.theme.muted())),
        ])
    }

    fn section_header(&self, label: &str, count: usize) -> Line<'static> {
        Line::from(Span::styled(
            format!("{} ({})", label, count),
            Style::default()
                .fg(self.theme.heading())
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(Self::line_count(self.directory));
        lines.push(self.section_header("Active", self.directory.active.len()));
        lines.extend(self.directory.active.iter().map(|m| self.member_line(m, true)));
        lines.push(Line::raw(""));
        lines.push(self.section_header("Inactive", self.directory.inactive.len()));
        lines.extend(
            self.directory
                .inactive
                .iter()
                .map(|m| self.member_line(m, false)),
        );
        lines
    }
}

impl Widget for StaffView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Min(1),    // Members
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Staff, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);

        let lines: Vec<Line> = self.lines().into_iter().skip(self.scroll).collect();
        Paragraph::new(lines).render(chunks[3], buf);

        render_separator(chunks[4], buf, self.theme);
        let key = Style::default().fg(self.theme.accent());
        let desc = Style::default().fg(self.theme.muted());
        Paragraph::new(Line::from(vec![
            Span::styled("j/k", key),
            Span::styled(": Scroll", desc),
            Span::raw("  "),
            Span::styled("Tab", key),
            Span::styled(": Switch view", desc),
            Span::raw("  "),
            Span::styled("q", key),
            Span::styled(": Quit", desc),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_member(id: u64, name: &str, status: &str) -> StaffMember {
        StaffMember {
            id,
            name: name.to_string(),
            email: format!("{}@salon.test", name.to_lowercase()),
            phone: String::new(),
            specialties: vec!["Color".into(), "Cuts".into()],
            status: status.to_string(),
            rating: 4.8,
            completed_services: 12,
        }
    }

    #[test]
    fn test_renders_sections_with_counts() {
        let staff = vec![
            make_member(1, "Emily", "active"),
            make_member(2, "James", "inactive"),
            make_member(3, "Sofia", "active"),
        ];
        let directory = StaffDirectory::partition(&staff);

        let area = Rect::new(0, 0, 100, 15);
        let mut buf = Buffer::empty(area);
        StaffView::new(&directory, 0, Theme::Dark).render(area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Active (2)"));
        assert!(content.contains("Inactive (1)"));
        assert!(content.contains("Emily"));
        assert!(content.contains("Color, Cuts"));
        assert!(content.contains("emily@salon.test"));
    }

    #[test]
    fn test_line_count() {
        let staff = vec![make_member(1, "Emily", "active")];
        let directory = StaffDirectory::partition(&staff);
        assert_eq!(StaffView::line_count(&directory), 4);
    }
}

//! Services view widget - service catalog grouped by category

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::insights::render_separator;
use super::tabs::{Tab, TabBar};
use crate::format::{format_currency, truncate_name};
use crate::services::group_by_category;
use crate::tui::theme::Theme;
use crate::types::Service;

const MAX_CONTENT_WIDTH: u16 = 170;

/// Table width: Name(30) + Duration(12) + Price(12) + Staff(24) = 78
const TABLE_WIDTH: u16 = 78;

/// Services view widget, one section per category
pub struct ServicesView<'a> {
    services: &'a [Service],
    scroll: usize,
    theme: Theme,
}

impl<'a> ServicesView<'a> {
    pub fn new(services: &'a [Service], scroll: usize, theme: Theme) -> Self {
        Self {
            services,
            scroll,
            theme,
        }
    }

    /// Total rendered lines (a header and a gap per category, plus rows)
    pub fn line_count(services: &[Service]) -> usize {
        services.len() + group_by_category(services).len() * 2
    }

    fn header(&self) -> Line<'static> {
        let style = Style::default()
            .fg(self.theme.muted())
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled(format!("  {:<28}", "Service"), style),
            Span::styled(format!("{:<12}", "Duration"), style),
            Span::styled(format!("{:>12}", "Price"), style),
            Span::styled(format!("  {:<22}", "Staff"), style),
        ])
    }

    fn category_line(&self, category: &str, count: usize) -> Line<'static> {
        Line::from(Span::styled(
            format!("{} ({})", category, count),
            Style::default()
                .fg(self.theme.heading())
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn row(&self, service: &Service) -> Line<'static> {
        let price = service
            .price
            .map(format_currency)
            .unwrap_or_else(|| "-".to_string());
        let duration = if service.duration.is_empty() {
            "-"
        } else {
            service.duration.as_str()
        };

        Line::from(vec![
            Span::styled(
                format!("  {:<28}", truncate_name(&service.name, 26)),
                Style::default().fg(self.theme.accent()),
            ),
            Span::styled(
                format!("{:<12}", truncate_name(duration, 10)),
                Style::default().fg(self.theme.muted()),
            ),
            Span::styled(
                format!("{:>12}", price),
                Style::default().fg(self.theme.revenue()),
            ),
            Span::styled(
                format!("  {:<22}", truncate_name(service.staff_label(), 22)),
                Style::default().fg(self.theme.text()),
            ),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(Self::line_count(self.services));
        for (category, members) in group_by_category(self.services) {
            lines.push(self.category_line(category, members.len()));
            lines.extend(members.into_iter().map(|s| self.row(s)));
            lines.push(Line::raw(""));
        }
        lines
    }
}

impl Widget for ServicesView<'_> {
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
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Rows
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Services, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);

        let offset = chunks[3].width.saturating_sub(TABLE_WIDTH) / 2;
        let table_area = |chunk: Rect| Rect {
            x: chunk.x + offset,
            y: chunk.y,
            width: TABLE_WIDTH.min(chunk.width),
            height: chunk.height,
        };

        Paragraph::new(self.header()).render(table_area(chunks[3]), buf);

        if self.services.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No services yet.",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        } else {
            let lines: Vec<Line> = self.lines().into_iter().skip(self.scroll).collect();
            Paragraph::new(lines).render(table_area(chunks[4]), buf);
        }

        render_separator(chunks[5], buf, self.theme);
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
        .render(chunks[6], buf);
    }
}

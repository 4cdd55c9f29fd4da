//! Insights view widget - category popularity and revenue charts

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::format::{
    diagnostics_summary, format_bar, name_width, truncate_name, ChartMetric, EMPTY_MESSAGE,
};
use crate::tui::theme::Theme;
use crate::types::{InsightsQuery, InsightsReport, Timeframe};

/// Maximum content width (consistent with the other views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Insights view widget
pub struct InsightsView<'a> {
    report: &'a InsightsReport,
    query: &'a InsightsQuery,
    reference: NaiveDate,
    theme: Theme,
}

impl<'a> InsightsView<'a> {
    pub fn new(
        report: &'a InsightsReport,
        query: &'a InsightsQuery,
        reference: NaiveDate,
        theme: Theme,
    ) -> Self {
        Self {
            report,
            query,
            reference,
            theme,
        }
    }

    fn period_label(&self) -> String {
        match self.query.timeframe {
            Timeframe::Monthly => self.reference.format("%B %Y").to_string(),
            Timeframe::Yearly => self.reference.format("%Y").to_string(),
        }
    }
}

impl Widget for InsightsView<'_> {
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
            Constraint::Length(1), // Filters
            Constraint::Length(1), // Padding
            Constraint::Min(3),    // Charts
            Constraint::Length(1), // Diagnostics
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Insights, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_filters(chunks[3], buf);

        if self.report.is_empty() {
            self.render_empty(chunks[5], buf);
        } else {
            let panels = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[5]);
            self.render_chart(panels[0], buf, ChartMetric::Count);
            self.render_chart(panels[1], buf, ChartMetric::Revenue);
        }

        if let Some(summary) = diagnostics_summary(&self.report.diagnostics) {
            Paragraph::new(Line::from(Span::styled(
                format!("Skipped or adjusted: {}", summary),
                Style::default().fg(self.theme.warning()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        render_separator(chunks[7], buf, self.theme);
        self.render_keybindings(chunks[8], buf);
    }
}

impl InsightsView<'_> {
    fn render_filters(&self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled("Timeframe: ", Style::default().fg(self.theme.muted())),
            Span::styled(
                self.query.timeframe.label(),
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", self.period_label()),
                Style::default().fg(self.theme.muted()),
            ),
            Span::raw("    "),
            Span::styled("Category: ", Style::default().fg(self.theme.muted())),
            Span::styled(
                self.query.category.label().to_string(),
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height / 2;
        Paragraph::new(Line::from(Span::styled(
            EMPTY_MESSAGE,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
            buf,
        );
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer, metric: ChartMetric) {
        let block = Block::default()
            .title(format!(" {} ", metric.title()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()))
            .title_style(
                Style::default()
                    .fg(self.theme.heading())
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let name_width = name_width(self.report);
        let labels: Vec<String> = self
            .report
            .rows
            .iter()
            .map(|row| metric.label(row, self.report))
            .collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let bar_width = (inner.width as usize).saturating_sub(name_width + label_width + 4);
        let max = metric.max(self.report);
        let value_color = match metric {
            ChartMetric::Count => self.theme.text(),
            ChartMetric::Revenue => self.theme.revenue(),
        };

        for (i, (row, label)) in self.report.rows.iter().zip(&labels).enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let line = Line::from(vec![
                Span::styled(
                    format!(" {:<name_width$} ", truncate_name(&row.name, name_width)),
                    Style::default().fg(self.theme.accent()),
                ),
                Span::styled(
                    format_bar(metric.value(row), max, bar_width),
                    Style::default().fg(self.theme.bar()),
                ),
                Span::styled(
                    format!(" {:>label_width$}", label),
                    Style::default().fg(value_color),
                ),
            ]);
            Paragraph::new(line).render(
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
                buf,
            );
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(self.theme.accent());
        let desc = Style::default().fg(self.theme.muted());
        Paragraph::new(Line::from(vec![
            Span::styled("t", key),
            Span::styled(": Timeframe", desc),
            Span::raw("  "),
            Span::styled("c/C", key),
            Span::styled(": Category", desc),
            Span::raw("  "),
            Span::styled("r", key),
            Span::styled(": Reload", desc),
            Span::raw("  "),
            Span::styled("?", key),
            Span::styled(": Help", desc),
            Span::raw("  "),
            Span::styled("q", key),
            Span::styled(": Quit", desc),
        ]))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Full-width muted rule
pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

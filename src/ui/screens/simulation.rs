use crate::fuzzy::{InferenceEngine, InferenceResult};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Aggregated output curve for one evaluation, with the crisp centroid
/// marked, plus the firing strength of every rule.
pub struct SimulationScreen<'a> {
    engine: &'a InferenceEngine,
    result: &'a InferenceResult,
    inputs: (f64, f64, f64),
}

impl<'a> SimulationScreen<'a> {
    pub fn new(
        engine: &'a InferenceEngine,
        result: &'a InferenceResult,
        inputs: (f64, f64, f64),
    ) -> Self {
        Self {
            engine,
            result,
            inputs,
        }
    }
}

impl Widget for SimulationScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Min(10),    // Aggregated curve
                Constraint::Length(14), // Rule strengths
                Constraint::Length(1),  // Nav
            ])
            .split(area);

        let (soil, temp, rad) = self.inputs;
        let verdict = if self.result.fallback {
            Span::styled(" (no rule fired, midpoint fallback)", Theme::dim())
        } else {
            Span::styled("", Theme::dim())
        };
        let title = Line::from(vec![
            Span::styled("Simulation", Theme::title()),
            Span::styled(
                format!("  H={}%  T={}°C  R={} W/m²  →  ", soil, temp, rad),
                Theme::normal(),
            ),
            Span::styled(
                format!("{:.2} min", self.result.duration),
                Theme::highlight(),
            ),
            verdict,
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_curve(chunks[1], buf);
        self.render_strengths(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Memberships ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl SimulationScreen<'_> {
    fn render_curve(&self, area: Rect, buf: &mut Buffer) {
        let universe = self.engine.output().universe();
        let marker = [
            (self.result.duration, 0.0),
            (self.result.duration, 1.0),
        ];

        let datasets = vec![
            Dataset::default()
                .name("aggregated output")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Theme::ACCENT))
                .data(&self.result.aggregated_curve),
            Dataset::default()
                .name(format!("centroid {:.2}", self.result.duration))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Theme::CENTROID))
                .data(&marker),
        ];

        let x_labels = [
            format!("{:.0}", universe.min()),
            format!("{:.0}", universe.midpoint()),
            format!("{:.0}", universe.max()),
        ];

        Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled("Irrigation Duration (min)", Theme::normal()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .x_axis(
                Axis::default()
                    .bounds([universe.min(), universe.max()])
                    .labels(x_labels)
                    .style(Theme::dim()),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, 1.05])
                    .labels(["0", "0.5", "1"])
                    .style(Theme::dim()),
            )
            .render(area, buf);
    }

    fn render_strengths(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Rule Firing Strengths", Theme::normal()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let bar_width = 20usize;
        let lines: Vec<Line> = self
            .result
            .rule_strengths
            .iter()
            .map(|rs| {
                let filled = (rs.strength * bar_width as f64).round() as usize;
                let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
                let style = if rs.strength > 0.0 {
                    Theme::normal()
                } else {
                    Theme::dim()
                };
                Line::from(vec![
                    Span::styled(format!("{:<40}", rs.label), style),
                    Span::styled(bar, style),
                    Span::styled(format!(" {:.2}", rs.strength), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

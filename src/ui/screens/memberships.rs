use crate::fuzzy::{InferenceEngine, LinguisticVariable};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Membership curves for all four variables in a 2x2 grid.
pub struct MembershipsScreen<'a> {
    engine: &'a InferenceEngine,
}

impl<'a> MembershipsScreen<'a> {
    pub fn new(engine: &'a InferenceEngine) -> Self {
        Self { engine }
    }
}

impl Widget for MembershipsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Charts
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![Span::styled(
            "Membership Functions",
            Theme::title(),
        )]);
        Paragraph::new(title).render(chunks[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let inputs = self.engine.inputs();
        render_variable_chart(&inputs[0], "Soil Moisture (%)", top[0], buf);
        render_variable_chart(&inputs[1], "Temperature (°C)", top[1], buf);
        render_variable_chart(&inputs[2], "Solar Radiation (W/m²)", bottom[0], buf);
        render_variable_chart(self.engine.output(), "Irrigation Duration (min)", bottom[1], buf);

        let nav = Line::from(vec![
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Simulation ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

fn render_variable_chart(variable: &LinguisticVariable, title: &str, area: Rect, buf: &mut Buffer) {
    let universe = variable.universe();

    // One sampled curve per term, borrowed by the datasets below.
    let curves: Vec<(&str, Vec<(f64, f64)>)> = variable
        .terms()
        .iter()
        .map(|(term, mf)| {
            let points: Vec<(f64, f64)> = universe.points().map(|x| (x, mf.degree(x))).collect();
            (*term, points)
        })
        .collect();

    let datasets: Vec<Dataset> = curves
        .iter()
        .enumerate()
        .map(|(i, (term, points))| {
            Dataset::default()
                .name(term.replace('_', " "))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Theme::term_color(i)))
                .data(points)
        })
        .collect();

    let x_labels = [
        format!("{:.0}", universe.min()),
        format!("{:.0}", universe.midpoint()),
        format!("{:.0}", universe.max()),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(title.to_string(), Theme::normal()))
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
        );

    chart.render(area, buf);
}

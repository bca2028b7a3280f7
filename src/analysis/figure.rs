//! Figure descriptions and their plotters rendering
//!
//! Procedures return [`Figure`] values; nothing is drawn until the caller
//! hands [`Figure::render`] a drawing area it owns (an SVG string, a bitmap,
//! a window surface).

use std::collections::BTreeSet;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::{AnalysisError, Result};

/// Five stops of the viridis colormap
const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

/// Matplotlib's tab10 qualitative palette
const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Point colouring for a scatter panel
#[derive(Debug, Clone, PartialEq)]
pub enum Hue {
    /// Experimental condition label per point
    Condition(Vec<String>),
    /// Cluster index per point
    Cluster(Vec<usize>),
}

/// Points sharing one colour and legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    pub hue: Hue,
}

impl ScatterPanel {
    /// Split points into legend groups.
    ///
    /// Condition levels are sorted and spread over viridis; clusters use
    /// tab10. Points beyond the end of the hue vector are dropped.
    pub fn groups(&self) -> Vec<PointGroup> {
        match &self.hue {
            Hue::Condition(labels) => {
                let levels: Vec<&String> = labels.iter().collect::<BTreeSet<_>>().into_iter().collect();
                levels
                    .iter()
                    .enumerate()
                    .map(|(i, level)| PointGroup {
                        label: level.to_string(),
                        color: viridis(i, levels.len()),
                        points: self
                            .points
                            .iter()
                            .zip(labels)
                            .filter(|(_, l)| l == level)
                            .map(|(p, _)| *p)
                            .collect(),
                    })
                    .collect()
            }
            Hue::Cluster(labels) => {
                let clusters: BTreeSet<usize> = labels.iter().copied().collect();
                clusters
                    .into_iter()
                    .map(|cluster| PointGroup {
                        label: format!("Cluster {cluster}"),
                        color: TAB10[cluster % TAB10.len()],
                        points: self
                            .points
                            .iter()
                            .zip(labels)
                            .filter(|(_, l)| **l == cluster)
                            .map(|(p, _)| *p)
                            .collect(),
                    })
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: String,
    pub color: RGBColor,
    pub dashed: bool,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Scatter(ScatterPanel),
    Lines(LinePanel),
    /// Unused grid cell
    Empty,
}

impl Panel {
    pub fn title(&self) -> Option<&str> {
        match self {
            Panel::Scatter(p) => Some(&p.title),
            Panel::Lines(p) => Some(&p.title),
            Panel::Empty => None,
        }
    }
}

/// A grid of panels, filled row by row
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self {
            title: None,
            rows,
            cols,
            panels: Vec::with_capacity(rows * cols),
        }
    }

    pub fn single(panel: Panel) -> Self {
        Self::grid(1, 1).with_panel(panel)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn panel_titles(&self) -> Vec<&str> {
        self.panels.iter().filter_map(Panel::title).collect()
    }

    /// Draw every panel onto `area`, split evenly into the figure's grid
    pub fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        area.fill(&WHITE).map_err(render_error)?;

        let body = match &self.title {
            Some(title) => area.titled(title, ("sans-serif", 20)).map_err(render_error)?,
            None => area.clone(),
        };

        let cells = body.split_evenly((self.rows.max(1), self.cols.max(1)));
        for (panel, cell) in self.panels.iter().zip(cells.iter()) {
            match panel {
                Panel::Scatter(scatter) => draw_scatter(scatter, cell)?,
                Panel::Lines(lines) => draw_lines(lines, cell)?,
                Panel::Empty => {}
            }
        }

        area.present().map_err(render_error)
    }
}

fn draw_scatter<DB: DrawingBackend>(
    panel: &ScatterPanel,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let (x_range, y_range) = bounds(panel.points.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 14))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(render_error)?;

    for group in panel.groups() {
        let color = group.color;
        chart
            .draw_series(
                group
                    .points
                    .iter()
                    .map(move |&(x, y)| Circle::new((x, y), 3, color.mix(0.7).filled())),
            )
            .map_err(render_error)?
            .label(group.label)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)
}

fn draw_lines<DB: DrawingBackend>(panel: &LinePanel, area: &DrawingArea<DB, Shift>) -> Result<()> {
    let (x_range, y_range) = bounds(panel.lines.iter().flat_map(|l| l.points.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(render_error)?;

    for line in &panel.lines {
        let color = line.color;
        let style = color.mix(if line.dashed { 0.8 } else { 0.5 }).stroke_width(2);
        let anno = if line.dashed {
            chart
                .draw_series(DashedLineSeries::new(line.points.iter().copied(), 6, 4, style))
                .map_err(render_error)?
        } else {
            chart
                .draw_series(LineSeries::new(line.points.iter().copied(), style))
                .map_err(render_error)?
        };
        anno.label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)
}

fn viridis(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return VIRIDIS[0];
    }
    let position = index as f64 / (count - 1) as f64 * (VIRIDIS.len() - 1) as f64;
    VIRIDIS[position.round() as usize]
}

/// Padded axis ranges covering every point
fn bounds(points: impl Iterator<Item = (f64, f64)>) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for (x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    (pad(x_min, x_max), pad(y_min, y_max))
}

fn pad(min: f64, max: f64) -> std::ops::Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let margin = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - margin)..(max + margin)
}

fn render_error<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scatter(hue: Hue) -> ScatterPanel {
        ScatterPanel {
            title: "LC Activations".to_string(),
            x_label: "PCA Component 1".to_string(),
            y_label: "PCA Component 2".to_string(),
            points: vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.5), (3.0, -1.0)],
            hue,
        }
    }

    #[test]
    fn test_condition_groups_sorted() {
        let panel = scatter(Hue::Condition(
            ["low", "high", "low", "high"].iter().map(|s| s.to_string()).collect(),
        ));
        let groups = panel.groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "high");
        assert_eq!(groups[0].points, vec![(1.0, 1.0), (3.0, -1.0)]);
        assert_eq!(groups[1].label, "low");
        assert_ne!(groups[0].color, groups[1].color);
    }

    #[test]
    fn test_cluster_groups() {
        let panel = scatter(Hue::Cluster(vec![1, 0, 1, 1]));
        let groups = panel.groups();

        assert_eq!(groups[0].label, "Cluster 0");
        assert_eq!(groups[0].points, vec![(1.0, 1.0)]);
        assert_eq!(groups[1].points.len(), 3);
        assert_eq!(groups[1].color, TAB10[1]);
    }

    #[test]
    fn test_bounds_degenerate() {
        let (x, y) = bounds(vec![(2.0, 2.0)].into_iter());
        assert_eq!(x, 1.0..3.0);
        assert_eq!(y, 1.0..3.0);

        let (x, _) = bounds(std::iter::empty());
        assert_eq!(x, 0.0..1.0);
    }

    #[test]
    fn test_render_to_svg() {
        let figure = Figure::grid(1, 2)
            .with_title("Activations")
            .with_panel(Panel::Scatter(scatter(Hue::Cluster(vec![0, 1, 0, 1]))))
            .with_panel(Panel::Lines(LinePanel {
                title: "Over time".to_string(),
                x_label: "Time (Trials)".to_string(),
                y_label: "Normalized Activation".to_string(),
                lines: vec![Line {
                    label: "Actual Pupil Dilation".to_string(),
                    color: BLUE,
                    dashed: true,
                    points: vec![(0.0, 0.1), (1.0, 0.9), (2.0, 0.4)],
                }],
            }));

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (800, 400)).into_drawing_area();
            figure.render(&root).unwrap();
        }

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Over time"));
        assert_eq!(figure.panel_titles(), vec!["LC Activations", "Over time"]);
    }
}

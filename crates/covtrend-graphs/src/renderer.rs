//! Graph rendering trait and implementations

use crate::utils::{month_ticks, to_hex};
use crate::{AxisScale, ColorScheme, DataSet, GraphConfig, OutputFormat, XAxis};
use covtrend_common::{format_month, format_thousands, CovError, Result};
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Trait for rendering graphs with different types and styling options
#[async_trait::async_trait]
pub trait GraphRenderer: Send + Sync {
    /// Render a graph to a file path; the extension picks PNG or SVG
    async fn render_to_file(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
        path: &Path,
    ) -> Result<()>;

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
                RGBColor(188, 189, 34),  // Olive
                RGBColor(23, 190, 207),  // Cyan
            ],
            ColorScheme::Dark => vec![
                RGBColor(55, 126, 184),
                RGBColor(255, 152, 150),
                RGBColor(77, 175, 74),
                RGBColor(255, 187, 120),
                RGBColor(152, 78, 163),
            ],
            ColorScheme::Light => vec![
                RGBColor(166, 206, 227),
                RGBColor(251, 180, 174),
                RGBColor(179, 226, 205),
                RGBColor(253, 205, 172),
                RGBColor(203, 213, 232),
            ],
            ColorScheme::Vibrant => vec![
                RGBColor(230, 25, 75),
                RGBColor(60, 180, 75),
                RGBColor(255, 225, 25),
                RGBColor(0, 130, 200),
                RGBColor(245, 130, 48),
                RGBColor(145, 30, 180),
                RGBColor(70, 240, 240),
                RGBColor(240, 50, 230),
            ],
            ColorScheme::Monochrome => vec![
                RGBColor(0, 0, 0),
                RGBColor(64, 64, 64),
                RGBColor(128, 128, 128),
                RGBColor(192, 192, 192),
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }

    /// Color of the `index`th dataset: its own color, else the scheme's
    fn dataset_color(&self, config: &GraphConfig, dataset: &DataSet, index: usize) -> RGBColor {
        if let Some(color) = &dataset.color {
            return self.parse_color(color);
        }
        let colors = self.get_colors(&config.style.color_scheme);
        if colors.is_empty() {
            RGBColor(0, 0, 0)
        } else {
            colors[index % colors.len()]
        }
    }
}

/// A dataset reduced to the points that can be drawn on the configured axes
#[derive(Debug, Clone)]
pub(crate) struct PreparedSeries {
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
    pub annotation: Option<String>,
}

/// Axis ranges covering every prepared point
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlotBounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl PlotBounds {
    /// Bounds used when there is nothing to draw
    fn empty(scale: AxisScale) -> Self {
        Self {
            x: 0.0..30.0,
            y: match scale {
                AxisScale::Linear => 0.0..1.0,
                AxisScale::Log => 1.0..10.0,
            },
        }
    }

    /// Widen the x range so every tick is on the axis
    fn cover_x(&mut self, ticks: &[f64]) {
        if let (Some(&first), Some(&last)) = (ticks.first(), ticks.last()) {
            self.x = self.x.start.min(first)..self.x.end.max(last);
        }
    }

    /// Padded bounds for `series`, or `None` when there are no points
    fn of(series: &[PreparedSeries], scale: AxisScale, x_pad: f64) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let &(x0, y0) = points.next()?;
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if x_max <= x_min {
            x_min -= 1.0;
            x_max += 1.0;
        }
        let x_max = x_max + (x_max - x_min) * x_pad;

        let y = match scale {
            AxisScale::Linear => {
                let lo = y_min.min(0.0);
                let hi = if y_max > lo { y_max * 1.1 } else { lo + 1.0 };
                lo..hi.max(lo + 1.0)
            }
            AxisScale::Log => {
                let lo = 10f64.powf(y_min.log10().floor());
                let mut hi = 10f64.powf(y_max.log10().ceil());
                if hi <= lo {
                    hi = lo * 10.0;
                }
                lo..hi
            }
        };

        Some(Self { x: x_min..x_max, y })
    }
}

/// Label for an x coordinate: `mm-YYYY` on date axes, the day number otherwise
fn x_label(axis: XAxis, x: f64) -> String {
    match axis.date_at(x) {
        Some(date) => format_month(date),
        None => format!("{x:.0}"),
    }
}

/// Concrete implementation of GraphRenderer for line charts
#[derive(Debug, Clone, Default)]
pub struct LineChartRenderer {
    allow_empty: bool,
}

impl LineChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw empty axes instead of failing when there are no points
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Drops non-finite points, and points with `y <= 0` on a log axis
    pub(crate) fn prepare(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
    ) -> Vec<PreparedSeries> {
        datasets
            .iter()
            .enumerate()
            .map(|(i, dataset)| {
                let points: Vec<(f64, f64)> = dataset
                    .data
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite())
                    .filter(|p| config.y_scale == AxisScale::Linear || p.y > 0.0)
                    .map(|p| (p.x, p.y))
                    .collect();

                let dropped = dataset.data.len() - points.len();
                if dropped > 0 {
                    debug!(
                        dataset = %dataset.name,
                        dropped,
                        "Skipping points that cannot be drawn"
                    );
                }

                PreparedSeries {
                    color: self.dataset_color(config, dataset, i),
                    points,
                    annotation: dataset.annotation.clone(),
                }
            })
            .collect()
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        config: &GraphConfig,
        datasets: &[DataSet],
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let series = self.prepare(config, datasets);
        let mut bounds = match PlotBounds::of(&series, config.y_scale, 0.08) {
            Some(bounds) => bounds,
            None if self.allow_empty => PlotBounds::empty(config.y_scale),
            None => {
                return Err(CovError::graph(format!(
                    "'{}' has no points to draw",
                    config.title
                )))
            }
        };
        let ticks = month_ticks(config.x_axis, &bounds.x);
        bounds.cover_x(&ticks);

        root.fill(&self.get_background_color(config))?;

        let frame = Frame {
            config,
            bounds: &bounds,
            ticks: &ticks,
            grid_color: config
                .style
                .grid
                .color
                .as_deref()
                .map(|c| self.parse_color(c)),
        };
        let (x, y) = (bounds.x.clone(), bounds.y.clone());
        // Date axes are labelled on the month-end ticks only
        match (config.y_scale, ticks.is_empty()) {
            (AxisScale::Linear, true) => plot_lines(&root, &frame, &series, x, y)?,
            (AxisScale::Linear, false) => {
                plot_lines(&root, &frame, &series, x.with_key_points(ticks.clone()), y)?
            }
            (AxisScale::Log, true) => plot_lines(&root, &frame, &series, x, y.log_scale())?,
            (AxisScale::Log, false) => plot_lines(
                &root,
                &frame,
                &series,
                x.with_key_points(ticks.clone()),
                y.log_scale(),
            )?,
        }

        root.present()?;
        Ok(())
    }
}

/// What the plotting helpers share besides the coordinate specs
struct Frame<'a> {
    config: &'a GraphConfig,
    bounds: &'a PlotBounds,
    ticks: &'a [f64],
    grid_color: Option<RGBColor>,
}

/// Vertical month-end guide lines
fn guide_lines<'a>(frame: &'a Frame<'a>) -> impl Iterator<Item = PathElement<(f64, f64)>> + 'a {
    let guide = RGBColor(160, 160, 160).mix(0.6);
    let (y_lo, y_hi) = (frame.bounds.y.start, frame.bounds.y.end);
    frame
        .ticks
        .iter()
        .map(move |&x| PathElement::new(vec![(x, y_lo), (x, y_hi)], guide))
}

fn plot_lines<DB, X, Y>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame<'_>,
    series: &[PreparedSeries],
    x_spec: X,
    y_spec: Y,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let Frame { config, bounds, grid_color, .. } = *frame;
    let style = &config.style;
    let mut chart = ChartBuilder::on(root)
        .caption(
            &config.title,
            (style.title_font.family.as_str(), style.title_font.size),
        )
        .margin_top(style.margins.top)
        .margin_right(style.margins.right)
        .margin_left(10)
        .margin_bottom(10)
        .x_label_area_size(style.margins.bottom)
        .y_label_area_size(style.margins.left)
        .build_cartesian_2d(x_spec, y_spec)?;

    let axis_font = (style.axis_font.family.as_str(), style.axis_font.size);
    let x_axis = config.x_axis;
    let x_formatter = move |x: &f64| x_label(x_axis, *x);
    let y_formatter = |y: &f64| format_thousands(y.round() as i64);

    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(axis_font)
        .axis_desc_style(axis_font)
        .x_labels(8)
        .y_labels(10);
    if let Some(desc) = &config.x_label {
        mesh.x_desc(desc.as_str());
    }
    if let Some(desc) = &config.y_label {
        mesh.y_desc(desc.as_str());
    }
    if let Some(color) = grid_color {
        mesh.bold_line_style(color).light_line_style(color.mix(0.3));
    }
    if !style.grid.show_x {
        mesh.disable_x_mesh();
    }
    if !style.grid.show_y {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    chart.draw_series(guide_lines(frame))?;

    let (y_lo, y_hi) = (bounds.y.start, bounds.y.end);
    if !style.despine {
        let (x_lo, x_hi) = (bounds.x.start, bounds.x.end);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x_lo, y_hi), (x_hi, y_hi), (x_hi, y_lo)],
            BLACK,
        )))?;
    }

    let label_font = (style.label_font.family.as_str(), style.label_font.size);
    for s in series.iter().filter(|s| !s.points.is_empty()) {
        chart.draw_series(LineSeries::new(
            s.points.iter().copied(),
            s.color.stroke_width(2),
        ))?;

        if let (Some(text), Some(&last)) = (&s.annotation, s.points.last()) {
            chart.draw_series(std::iter::once(
                EmptyElement::at(last)
                    + Text::new(
                        text.clone(),
                        (6, -7),
                        label_font.into_font().color(&s.color),
                    ),
            ))?;
        }
    }

    Ok(())
}

#[async_trait::async_trait]
impl GraphRenderer for LineChartRenderer {
    async fn render_to_file(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
        path: &Path,
    ) -> Result<()> {
        let size = (config.width, config.height);
        match OutputFormat::from_path(path)? {
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(root, config, datasets)?
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(root, config, datasets)?
            }
        }

        info!("Rendered line chart '{}' to {}", config.title, path.display());
        Ok(())
    }
}

/// Bar chart on a linear y axis with thousands-separated labels
#[derive(Debug, Clone, Default)]
pub struct BarChartRenderer;

impl BarChartRenderer {
    pub fn new() -> Self {
        Self
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        config: &GraphConfig,
        datasets: &[DataSet],
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let series: Vec<PreparedSeries> = datasets
            .iter()
            .enumerate()
            .map(|(i, dataset)| PreparedSeries {
                color: self.dataset_color(config, dataset, i),
                points: dataset
                    .data
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite())
                    .map(|p| (p.x, p.y))
                    .collect(),
                annotation: None,
            })
            .collect();

        let mut bounds = PlotBounds::of(&series, AxisScale::Linear, 0.0)
            .ok_or_else(|| CovError::graph(format!("'{}' has no bars to draw", config.title)))?;
        bounds.x = (bounds.x.start - 1.0)..(bounds.x.end + 1.0);
        let ticks = month_ticks(config.x_axis, &bounds.x);
        bounds.cover_x(&ticks);

        root.fill(&self.get_background_color(config))?;

        let frame = Frame {
            config,
            bounds: &bounds,
            ticks: &ticks,
            grid_color: config
                .style
                .grid
                .color
                .as_deref()
                .map(|c| self.parse_color(c)),
        };
        let (x, y) = (bounds.x.clone(), bounds.y.clone());
        if ticks.is_empty() {
            plot_bars(&root, &frame, &series, x, y)?;
        } else {
            plot_bars(&root, &frame, &series, x.with_key_points(ticks.clone()), y)?;
        }

        root.present()?;
        Ok(())
    }
}

fn plot_bars<DB, X>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame<'_>,
    series: &[PreparedSeries],
    x_spec: X,
    y_spec: Range<f64>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
{
    let Frame { config, grid_color, .. } = *frame;
    let style = &config.style;
    let mut chart = ChartBuilder::on(root)
        .caption(
            &config.title,
            (style.title_font.family.as_str(), style.title_font.size),
        )
        .margin_top(style.margins.top)
        .margin_right(20)
        .margin_left(10)
        .margin_bottom(10)
        .x_label_area_size(style.margins.bottom)
        .y_label_area_size(style.margins.left)
        .build_cartesian_2d(x_spec, y_spec)?;

    let axis_font = (style.axis_font.family.as_str(), style.axis_font.size);
    let x_axis = config.x_axis;
    let x_formatter = move |x: &f64| x_label(x_axis, *x);
    let y_formatter = |y: &f64| format_thousands(y.round() as i64);

    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(axis_font)
        .axis_desc_style(axis_font)
        .disable_x_mesh();
    if let Some(desc) = &config.x_label {
        mesh.x_desc(desc.as_str());
    }
    if let Some(desc) = &config.y_label {
        mesh.y_desc(desc.as_str());
    }
    if let Some(color) = grid_color {
        mesh.bold_line_style(color).light_line_style(color.mix(0.3));
    }
    if !style.grid.show_y {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    chart.draw_series(guide_lines(frame))?;

    for s in series {
        let color = s.color;
        chart.draw_series(
            s.points
                .iter()
                .map(|&(x, y)| Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], color.filled())),
        )?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl GraphRenderer for BarChartRenderer {
    async fn render_to_file(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
        path: &Path,
    ) -> Result<()> {
        let size = (config.width, config.height);
        match OutputFormat::from_path(path)? {
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(root, config, datasets)?
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(root, config, datasets)?
            }
        }

        info!("Rendered bar chart '{}' to {}", config.title, path.display());
        Ok(())
    }
}

/// Hex form of a renderer color, for [`DataSet::color`]
pub fn color_hex(color: RGBColor) -> String {
    to_hex(color.0, color.1, color.2)
}

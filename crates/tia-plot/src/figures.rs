use serde::{Deserialize, Serialize};

/// Matplotlib's default categorical cycle, so figures match the notebook look.
pub const SERIES_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TARGET_TICKS: f64 = 6.0;
const MAX_TICK_DECIMALS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub marker_radius: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            marker_radius: 6.0,
        }
    }
}

/// One labelled group of points drawn in a single colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Dashed straight line drawn across the plot, e.g. `y = x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: Option<String>,
    pub series: Vec<Series>,
    pub reference: Option<ReferenceLine>,
}

/// Axis range padded by 5% and snapped to round tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    step: f64,
}

impl Axis {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            });
        let (lo, hi) = if lo > hi {
            (0.0, 1.0)
        } else if (hi - lo).abs() < 1e-12 {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
        let pad = (hi - lo) * 0.05;
        let (min, max) = (lo - pad, hi + pad);
        let step = nice_step((max - min) / TARGET_TICKS);
        let mut ticks = Vec::new();
        let mut idx = (min / step).ceil() as i64;
        loop {
            let tick = idx as f64 * step;
            if tick > max + step * 1e-9 {
                break;
            }
            ticks.push(tick);
            idx += 1;
        }
        Self {
            min,
            max,
            ticks,
            step,
        }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    pub fn format_tick(&self, value: f64) -> String {
        let decimals = step_decimals(self.step);
        let rendered = format!("{value:.decimals$}");
        if rendered.starts_with('-') && rendered.trim_start_matches(['-', '0', '.']).is_empty() {
            rendered[1..].to_string()
        } else {
            rendered
        }
    }
}

/// Fewest decimals that print every multiple of `step` exactly, e.g. 1 for
/// 2.5 and 2 for 0.25.
fn step_decimals(step: f64) -> usize {
    (0..MAX_TICK_DECIMALS)
        .find(|&decimals| {
            let scaled = step * 10f64.powi(decimals as i32);
            (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(MAX_TICK_DECIMALS)
}

/// Rounds `raw` up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

struct Frame {
    x: Axis,
    y: Axis,
    left: f64,
    top: f64,
    plot_w: f64,
    plot_h: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + self.x.fraction(x) * self.plot_w
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.plot_h - self.y.fraction(y) * self.plot_h
    }
}

/// Renders a scatter figure as a standalone SVG document.
pub fn render_scatter_svg(figure: &ScatterFigure, config: &FigureConfig) -> String {
    let width = config.width as f64;
    let height = config.height as f64;
    let mut xs: Vec<f64> = figure
        .series
        .iter()
        .flat_map(|series| series.points.iter().map(|(x, _)| *x))
        .collect();
    let mut ys: Vec<f64> = figure
        .series
        .iter()
        .flat_map(|series| series.points.iter().map(|(_, y)| *y))
        .collect();
    if let Some(line) = &figure.reference {
        xs.extend([line.from.0, line.to.0]);
        ys.extend([line.from.1, line.to.1]);
    }
    let frame = Frame {
        x: Axis::from_values(xs),
        y: Axis::from_values(ys),
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        plot_w: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        plot_h: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
    };

    let mut parts = vec![format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}' font-family='sans-serif'>",
        w = config.width,
        h = config.height
    )];
    parts.push(format!(
        "<rect x='0' y='0' width='{w}' height='{h}' fill='#ffffff' />",
        w = config.width,
        h = config.height
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' font-size='16' text-anchor='middle'>{}</text>",
        frame.left + frame.plot_w / 2.0,
        MARGIN_TOP / 2.0 + 6.0,
        escape_xml(&figure.title)
    ));
    render_grid(&frame, &mut parts);
    parts.push(format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#000000' />",
        frame.left, frame.top, frame.plot_w, frame.plot_h
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' font-size='13' text-anchor='middle'>{}</text>",
        frame.left + frame.plot_w / 2.0,
        height - 15.0,
        escape_xml(&figure.x_label)
    ));
    let y_mid = frame.top + frame.plot_h / 2.0;
    parts.push(format!(
        "<text x='20' y='{y_mid:.2}' font-size='13' text-anchor='middle' transform='rotate(-90 20 {y_mid:.2})'>{}</text>",
        escape_xml(&figure.y_label)
    ));

    for (idx, series) in figure.series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        parts.push(format!("<g class='series' data-label='{}'>", escape_xml(&series.label)));
        for (x, y) in &series.points {
            parts.push(format!(
                "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{color}' stroke='#ffffff' stroke-width='1' />",
                frame.px(*x),
                frame.py(*y),
                config.marker_radius
            ));
        }
        parts.push("</g>".into());
    }

    if let Some(line) = &figure.reference {
        parts.push(format!(
            "<line class='reference' x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='2' stroke-dasharray='8 5' stroke-opacity='0.5' />",
            frame.px(line.from.0),
            frame.py(line.from.1),
            frame.px(line.to.0),
            frame.py(line.to.1),
            line.color
        ));
    }

    render_legend(figure, &frame, config, &mut parts);
    parts.push("</svg>".into());
    parts.join("")
}

fn render_grid(frame: &Frame, parts: &mut Vec<String>) {
    let bottom = frame.top + frame.plot_h;
    let right = frame.left + frame.plot_w;
    for tick in &frame.x.ticks {
        let x = frame.px(*tick);
        parts.push(format!(
            "<line x1='{x:.2}' y1='{:.2}' x2='{x:.2}' y2='{bottom:.2}' stroke='#b0b0b0' stroke-dasharray='4 3' stroke-opacity='0.7' />",
            frame.top
        ));
        parts.push(format!(
            "<text x='{x:.2}' y='{:.2}' font-size='11' text-anchor='middle'>{}</text>",
            bottom + 16.0,
            frame.x.format_tick(*tick)
        ));
    }
    for tick in &frame.y.ticks {
        let y = frame.py(*tick);
        parts.push(format!(
            "<line x1='{:.2}' y1='{y:.2}' x2='{right:.2}' y2='{y:.2}' stroke='#b0b0b0' stroke-dasharray='4 3' stroke-opacity='0.7' />",
            frame.left
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' font-size='11' text-anchor='end'>{}</text>",
            frame.left - 6.0,
            y + 4.0,
            frame.y.format_tick(*tick)
        ));
    }
}

fn render_legend(
    figure: &ScatterFigure,
    frame: &Frame,
    config: &FigureConfig,
    parts: &mut Vec<String>,
) {
    let x = frame.left + frame.plot_w + 20.0;
    let mut y = frame.top + 10.0;
    parts.push("<g class='legend'>".into());
    if let Some(title) = &figure.legend_title {
        parts.push(format!(
            "<text x='{x:.2}' y='{y:.2}' font-size='12' font-weight='bold'>{}</text>",
            escape_xml(title)
        ));
        y += 20.0;
    }
    for (idx, series) in figure.series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        parts.push(format!(
            "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{color}' stroke='#ffffff' />",
            x + 8.0,
            y - 4.0,
            config.marker_radius
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{y:.2}' font-size='12'>{}</text>",
            x + 22.0,
            escape_xml(&series.label)
        ));
        y += 20.0;
    }
    if let Some(line) = &figure.reference {
        parts.push(format!(
            "<line x1='{x:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='2' stroke-dasharray='8 5' stroke-opacity='0.5' />",
            y - 4.0,
            x + 16.0,
            y - 4.0,
            line.color
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{y:.2}' font-size='12'>{}</text>",
            x + 22.0,
            escape_xml(&line.label)
        ));
    }
    parts.push("</g>".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_steps() {
        assert!((nice_step(0.8) - 1.0).abs() < 1e-12);
        assert!((nice_step(17.0) - 20.0).abs() < 1e-9);
        assert!((nice_step(70.0) - 100.0).abs() < 1e-9);
        assert!((nice_step(0.23) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn axis_pads_and_ticks() {
        let axis = Axis::from_values([0.0, 100.0]);
        assert!(axis.min < 0.0 && axis.max > 100.0);
        assert_eq!(axis.ticks.first().copied(), Some(0.0));
        assert_eq!(axis.ticks.last().copied(), Some(100.0));
        assert_eq!(axis.format_tick(20.0), "20");
    }

    #[test]
    fn fractional_steps_keep_their_digits() {
        let axis = Axis::from_values([0.0, 12.0]);
        assert_eq!(axis.ticks, vec![0.0, 2.5, 5.0, 7.5, 10.0, 12.5]);
        let labels: Vec<String> = axis.ticks.iter().map(|t| axis.format_tick(*t)).collect();
        assert_eq!(labels, vec!["0.0", "2.5", "5.0", "7.5", "10.0", "12.5"]);

        let narrow = Axis::from_values([0.0, 1.2]);
        assert!((narrow.step - 0.25).abs() < 1e-12);
        assert_eq!(narrow.format_tick(0.75), "0.75");
        assert_eq!(step_decimals(20.0), 0);
        assert_eq!(step_decimals(0.2), 1);
    }

    #[test]
    fn degenerate_axis_is_widened() {
        let axis = Axis::from_values([5.0]);
        assert!(axis.max > axis.min);
        let empty = Axis::from_values(std::iter::empty());
        assert!(empty.min < 0.0 && empty.max > 1.0);
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape_xml("alpha+beta <&>"), "alpha+beta &lt;&amp;&gt;");
    }
}

//! Daily incident line chart.

use incident_map_analytics::series::{DateSeries, date_series};
use incident_map_incident_models::{AggregateTable, CanvasSize};

use crate::axis::BottomAxis;
use crate::curve::monotone_x_path;
use crate::scale::{LinearScale, TimeScale};
use crate::svg::{Element, num};

/// Chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Space above the highest value.
    pub top: f64,
    /// Space right of the last date.
    pub right: f64,
    /// Space below the x axis line, holding the tick labels.
    pub bottom: f64,
    /// Space left of the first date.
    pub left: f64,
}

/// Margins of the time-series surface.
pub const MARGINS: Margins = Margins {
    top: 20.0,
    right: 25.0,
    bottom: 50.0,
    left: 25.0,
};

/// Headroom added above the largest daily count.
const Y_HEADROOM: f64 = 5.0;
const DOT_RADIUS: f64 = 5.0;
const LABEL_OFFSET: f64 = -6.0;
const TICK_FORMAT: &str = "%b-%d";

/// Scales for a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesScales {
    /// Date to horizontal pixel.
    pub x: TimeScale,
    /// Count to vertical pixel, inverted.
    pub y: LinearScale,
}

/// Builds the x and y scales, or `None` for an empty series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn series_scales(series: &DateSeries, canvas: CanvasSize) -> Option<SeriesScales> {
    let extent = series.extent()?;
    let max = series.max_count()? as f64;

    Some(SeriesScales {
        x: TimeScale::new(extent, (MARGINS.left, canvas.width - MARGINS.right)),
        y: LinearScale::new(
            (0.0, max + Y_HEADROOM),
            (canvas.height - MARGINS.bottom, MARGINS.top),
        ),
    })
}

/// Renders the `#time_series_svg` surface from the cleaned date table.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_time_series(by_date: &AggregateTable, canvas: CanvasSize) -> Element {
    let series = date_series(by_date);
    let svg = Element::new("svg")
        .attr("id", "time_series_svg")
        .attr("width", num(canvas.width))
        .attr("height", num(canvas.height));

    let Some(scales) = series_scales(&series, canvas) else {
        log::debug!("No dated incidents, time series left empty");
        return svg;
    };

    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (scales.x.apply(p.date), scales.y.apply(p.count as f64)))
        .collect();

    let dots = points.iter().map(|(x, y)| {
        Element::new("circle")
            .attr("class", "dot")
            .attr("cx", num(*x))
            .attr("cy", num(*y))
            .attr("r", num(DOT_RADIUS))
    });

    let labels = series.points.iter().zip(&points).map(|(p, (x, y))| {
        Element::new("text")
            .attr("class", "label")
            .attr("x", num(*x))
            .attr("y", num(*y))
            .attr("dy", num(LABEL_OFFSET))
            .attr("text-anchor", "middle")
            .text(p.count)
    });

    let axis = series
        .points
        .iter()
        .zip(&points)
        .fold(BottomAxis::new(scales.x.range()), |axis, (p, (x, _))| {
            axis.tick(*x, p.date.format(TICK_FORMAT).to_string())
        })
        .build()
        .attr("class", "x axis")
        .attr(
            "transform",
            format!("translate(0,{})", num(canvas.height - MARGINS.bottom)),
        );

    log::debug!("Rendered {} time-series points", points.len());

    svg.child(axis)
        .child(
            Element::new("path")
                .attr("class", "line")
                .attr("fill", "none")
                .attr("d", monotone_x_path(&points)),
        )
        .children(dots)
        .children(labels)
}

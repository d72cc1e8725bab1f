//! Bottom-oriented axis.

use crate::svg::{Element, num};

/// One tick on an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub position: f64,
    /// Label text; empty for an unlabeled tick.
    pub label: String,
}

/// Builder for a horizontal axis with ticks hanging below the line.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomAxis {
    range: (f64, f64),
    ticks: Vec<Tick>,
    tick_size: f64,
    domain_line: bool,
}

impl BottomAxis {
    /// Creates an axis spanning the pixel `range` with 6 px ticks.
    #[must_use]
    pub const fn new(range: (f64, f64)) -> Self {
        Self {
            range,
            ticks: Vec::new(),
            tick_size: 6.0,
            domain_line: true,
        }
    }

    /// Sets the tick line length.
    #[must_use]
    pub const fn tick_size(mut self, size: f64) -> Self {
        self.tick_size = size;
        self
    }

    /// Omits the horizontal domain line.
    #[must_use]
    pub const fn without_domain(mut self) -> Self {
        self.domain_line = false;
        self
    }

    /// Adds a tick.
    #[must_use]
    pub fn tick(mut self, position: f64, label: impl Into<String>) -> Self {
        self.ticks.push(Tick {
            position,
            label: label.into(),
        });
        self
    }

    /// Ticks added so far.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Builds the axis group, to be positioned by the caller.
    #[must_use]
    pub fn build(&self) -> Element {
        let mut group = Element::new("g")
            .attr("fill", "none")
            .attr("font-size", 10)
            .attr("font-family", "sans-serif")
            .attr("text-anchor", "middle");

        if self.domain_line {
            let (r0, r1) = self.range;
            group = group.child(
                Element::new("path")
                    .attr("class", "domain")
                    .attr("stroke", "currentColor")
                    .attr(
                        "d",
                        format!("M{},6V0.5H{}V6", num(r0 + 0.5), num(r1 + 0.5)),
                    ),
            );
        }

        group.children(self.ticks.iter().map(|tick| {
            Element::new("g")
                .attr("class", "tick")
                .attr("opacity", 1)
                .attr("transform", format!("translate({},0)", num(tick.position)))
                .child(
                    Element::new("line")
                        .attr("stroke", "currentColor")
                        .attr("y2", num(self.tick_size)),
                )
                .child(
                    Element::new("text")
                        .attr("fill", "currentColor")
                        .attr("y", num(self.tick_size + 3.0))
                        .attr("dy", "0.71em")
                        .text(&tick.label),
                )
        }))
    }
}

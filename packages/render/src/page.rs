//! HTML document assembly.

use crate::svg::Element;

const STYLE: &str = include_str!("../assets/dashboard.css");
const TOOLTIP_SCRIPT: &str = include_str!("../assets/tooltip.js");

/// Wraps `body` children into a complete HTML document with the dashboard
/// stylesheet. The tooltip script is included when `interactive` is set.
#[must_use]
pub fn document(title: &str, body: Vec<Element>, interactive: bool) -> String {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").text(title))
        .child(Element::new("style").raw(STYLE));

    let mut body = Element::new("body")
        .child(Element::new("h1").text(title))
        .children(body);

    if interactive {
        body = body
            .child(Element::new("div").attr("class", "tooltip"))
            .child(Element::new("script").raw(TOOLTIP_SCRIPT));
    }

    let html = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body);

    format!("<!DOCTYPE html>\n{}\n", html.render())
}

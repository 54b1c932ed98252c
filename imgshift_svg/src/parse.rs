// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building a [`Document`] from markup.

use crate::document::{Document, GradientDef};
use crate::element::{Element, ElementKind, TextSpan};
use crate::error::Error;
use crate::style::{declarations, Style, PROPERTIES};
use crate::units::{
    length_or_zero, parse_fraction, parse_length, parse_number_list, parse_opacity, parse_points,
};
use imgshift_common::color::{parse_color, with_opacity, BLACK, TRANSPARENT};
use imgshift_common::kurbo::{Affine, Point, Rect};
use imgshift_common::paint::{
    GradientBase, GradientStop, GradientUnits, LinearGradient, Paint, RadialGradient,
};
use imgshift_common::path::parse_path;
use imgshift_common::peniko::Extend;
use imgshift_common::transform::parse_transform;
use log::debug;
use roxmltree::Node;
use std::collections::HashMap;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Intrinsic size used when neither the size attributes nor a view box give one.
const DEFAULT_SIZE: f64 = 100.0;
const DEFAULT_FONT_FAMILY: &str = "Arial";
const DEFAULT_FONT_SIZE: f64 = 12.0;

pub(crate) fn parse_document(text: &str) -> Result<Document, Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml = roxmltree::Document::parse_with_options(text, options)?;
    let root = xml.root_element();
    if root.tag_name().name() != "svg" {
        return Err(Error::NotSvg(root.tag_name().name().to_owned()));
    }

    let view_box = root.attribute("viewBox").and_then(parse_view_box);
    let size = |name: &str, from_view_box: Option<f64>| {
        root.attribute(name)
            .map(length_or_zero)
            .or(from_view_box)
            .unwrap_or(DEFAULT_SIZE)
    };
    let width = size("width", view_box.map(|vb| vb.width()));
    let height = size("height", view_box.map(|vb| vb.height()));

    let mut parser = Parser::default();
    let style = element_style(root, &Style::default());
    let transform = element_transform(root, Affine::IDENTITY);
    let mut elements = Vec::new();
    parser.parse_children(root, transform, &style, false, &mut elements);

    // The root's own opacity applies to the drawing as a whole.
    if style.opacity < 1.0 {
        elements = vec![Element {
            id: root.attribute("id").map(str::to_owned),
            transform,
            style,
            kind: ElementKind::Group(elements),
        }];
    }

    Ok(Document {
        width,
        height,
        view_box,
        elements,
        gradients: parser.gradients,
    })
}

fn parse_view_box(value: &str) -> Option<Rect> {
    match *parse_number_list(value).as_slice() {
        [x, y, w, h] if w > 0.0 && h > 0.0 => Some(Rect::new(x, y, x + w, y + h)),
        _ => {
            debug!("ignoring invalid viewBox {value:?}");
            None
        }
    }
}

#[derive(Default)]
struct Parser {
    gradients: HashMap<String, GradientDef>,
}

impl Parser {
    fn parse_children(
        &mut self,
        node: Node<'_, '_>,
        transform: Affine,
        style: &Style,
        in_defs: bool,
        out: &mut Vec<Element>,
    ) {
        for child in node.children().filter(Node::is_element) {
            self.parse_node(child, transform, style, in_defs, out);
        }
    }

    fn parse_node(
        &mut self,
        node: Node<'_, '_>,
        parent_transform: Affine,
        parent_style: &Style,
        in_defs: bool,
        out: &mut Vec<Element>,
    ) {
        let tag = node.tag_name().name();
        match tag {
            "linearGradient" | "radialGradient" => {
                self.parse_gradient(node);
                return;
            }
            "clipPath" | "mask" | "pattern" | "filter" | "marker" | "title" | "desc"
            | "metadata" | "style" | "script" => {
                debug!("skipping <{tag}> and its content");
                return;
            }
            _ => {}
        }

        let transform = element_transform(node, parent_transform);
        let style = element_style(node, parent_style);
        let attr = |name: &str| node.attribute(name).map(length_or_zero).unwrap_or(0.0);

        let kind = match tag {
            "rect" => {
                let (x, y) = (attr("x"), attr("y"));
                let rect = Rect::new(x, y, x + attr("width"), y + attr("height"));
                let rx = node.attribute("rx").map(length_or_zero);
                let ry = node.attribute("ry").map(length_or_zero);
                let (rx, ry) = match (rx, ry) {
                    (Some(rx), Some(ry)) => (rx, ry),
                    (Some(r), None) | (None, Some(r)) => (r, r),
                    (None, None) => (0.0, 0.0),
                };
                ElementKind::Rect { rect, rx, ry }
            }
            "circle" => ElementKind::Circle {
                center: Point::new(attr("cx"), attr("cy")),
                r: attr("r"),
            },
            "ellipse" => ElementKind::Ellipse {
                center: Point::new(attr("cx"), attr("cy")),
                rx: attr("rx"),
                ry: attr("ry"),
            },
            "line" => ElementKind::Line {
                from: Point::new(attr("x1"), attr("y1")),
                to: Point::new(attr("x2"), attr("y2")),
            },
            "polyline" => {
                ElementKind::Polyline(parse_points(node.attribute("points").unwrap_or_default()))
            }
            "polygon" => {
                ElementKind::Polygon(parse_points(node.attribute("points").unwrap_or_default()))
            }
            "path" => ElementKind::Path(parse_path(node.attribute("d").unwrap_or_default())),
            "text" => ElementKind::Text(parse_text(node)),
            "g" | "svg" | "symbol" | "use" | "a" | "switch" => {
                let mut children = Vec::new();
                self.parse_children(node, transform, &style, in_defs, &mut children);
                ElementKind::Group(children)
            }
            "defs" => {
                // Only the gradients in here matter; shapes are not drawn.
                self.parse_children(node, transform, &style, true, &mut Vec::new());
                return;
            }
            other => {
                debug!("unsupported element <{other}>, visiting its children");
                self.parse_children(node, transform, &style, in_defs, out);
                return;
            }
        };

        if !in_defs {
            out.push(Element {
                id: node.attribute("id").map(str::to_owned),
                transform,
                style,
                kind,
            });
        }
    }

    fn parse_gradient(&mut self, node: Node<'_, '_>) {
        let Some(id) = node.attribute("id") else {
            debug!("skipping gradient without an id");
            return;
        };

        let stops = node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "stop")
            .map(parse_stop);
        let mut base = GradientBase::new(stops);
        base.units = match node.attribute("gradientUnits") {
            Some("userSpaceOnUse") => GradientUnits::UserSpaceOnUse,
            _ => GradientUnits::ObjectBoundingBox,
        };
        base.extend = match node.attribute("spreadMethod") {
            Some("reflect") => Extend::Reflect,
            Some("repeat") => Extend::Repeat,
            _ => Extend::Pad,
        };
        base.transform = node
            .attribute("gradientTransform")
            .map(parse_transform)
            .unwrap_or(Affine::IDENTITY);

        let coord = |name: &str, default: f64| {
            node.attribute(name)
                .map(|v| parse_fraction(v).unwrap_or(0.0))
                .unwrap_or(default)
        };
        let paint = if node.tag_name().name() == "linearGradient" {
            Paint::LinearGradient(LinearGradient {
                start: Point::new(coord("x1", 0.0), coord("y1", 0.0)),
                end: Point::new(coord("x2", 1.0), coord("y2", 0.0)),
                base,
            })
        } else {
            let center = Point::new(coord("cx", 0.5), coord("cy", 0.5));
            Paint::RadialGradient(RadialGradient {
                center,
                radius: coord("r", 0.5),
                focal: Point::new(coord("fx", center.x), coord("fy", center.y)),
                base,
            })
        };

        let href = node
            .attribute((XLINK_NS, "href"))
            .or_else(|| node.attribute("href"))
            .map(|h| h.trim().trim_start_matches('#').to_owned());

        // The first definition of an id wins.
        self.gradients
            .entry(id.to_owned())
            .or_insert(GradientDef { paint, href });
    }
}

fn element_transform(node: Node<'_, '_>, parent: Affine) -> Affine {
    match node.attribute("transform") {
        Some(t) => parent * parse_transform(t),
        None => parent,
    }
}

/// The parent's style, overridden by presentation attributes, overridden by the inline style.
fn element_style(node: Node<'_, '_>, parent: &Style) -> Style {
    let mut style = parent.inherited();
    for name in PROPERTIES {
        if let Some(value) = node.attribute(name) {
            style.apply(name, value);
        }
    }
    if let Some(inline) = node.attribute("style") {
        for (name, value) in declarations(inline) {
            if !style.apply(name, value) {
                debug!("ignoring unsupported property {name}");
            }
        }
    }
    style
}

fn parse_stop(node: Node<'_, '_>) -> GradientStop {
    let mut color = node.attribute("stop-color");
    let mut opacity = node.attribute("stop-opacity");
    if let Some(inline) = node.attribute("style") {
        for (name, value) in declarations(inline) {
            match name {
                "stop-color" => color = Some(value),
                "stop-opacity" => opacity = Some(value),
                _ => {}
            }
        }
    }

    let offset = node
        .attribute("offset")
        .and_then(parse_fraction)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let color = match color {
        Some(c) => parse_color(c).unwrap_or(TRANSPARENT),
        None => BLACK,
    };
    let opacity = opacity.and_then(parse_opacity).unwrap_or(1.0);
    GradientStop {
        offset,
        color: with_opacity(color, opacity),
    }
}

fn parse_text(node: Node<'_, '_>) -> TextSpan {
    let mut font_family = node.attribute("font-family");
    let mut font_size = node.attribute("font-size");
    if let Some(inline) = node.attribute("style") {
        for (name, value) in declarations(inline) {
            match name {
                "font-family" => font_family = Some(value),
                "font-size" => font_size = Some(value),
                _ => {}
            }
        }
    }

    // Only the first entry of a coordinate list positions the run.
    let first = |name: &str| {
        node.attribute(name)
            .and_then(|v| v.split([',', ' ']).find(|s| !s.is_empty()))
            .map(length_or_zero)
            .unwrap_or(0.0)
    };
    let content = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    TextSpan {
        origin: Point::new(first("x"), first("y")),
        content,
        font_family: font_family.unwrap_or(DEFAULT_FONT_FAMILY).trim().to_owned(),
        font_size: font_size
            .and_then(parse_length)
            .unwrap_or(DEFAULT_FONT_SIZE),
    }
}

// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation properties and their cascade.

use crate::units::{parse_length, parse_opacity};
use imgshift_common::color::{parse_color, Rgba8, BLACK};
use imgshift_common::kurbo::{Cap, Join};
use imgshift_common::peniko::Fill;
use log::debug;

/// A reference to a paint, as written in a `fill` or `stroke` property.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintRef {
    /// Nothing is painted.
    None,
    /// A solid color.
    Color(Rgba8),
    /// A paint server defined elsewhere in the document, by id.
    Url(String),
}

impl PaintRef {
    /// Parse a `fill` or `stroke` value.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(rest) = value.strip_prefix("url(") {
            let id = rest.split(')').next().unwrap_or_default();
            let id = id.trim().trim_matches(|c| c == '"' || c == '\'');
            return Self::Url(id.trim_start_matches('#').to_owned());
        }
        match parse_color(value) {
            Some(color) => Self::Color(color),
            None => Self::None,
        }
    }
}

/// The presentation properties of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// What the interior is painted with.
    pub fill: PaintRef,
    /// What the outline is painted with.
    pub stroke: PaintRef,
    /// Width of the outline in user units.
    pub stroke_width: f64,
    /// Opacity of the element as a whole.
    pub opacity: f64,
    /// Opacity applied to the fill paint.
    pub fill_opacity: f64,
    /// Opacity applied to the stroke paint.
    pub stroke_opacity: f64,
    /// Which points count as inside.
    pub fill_rule: Fill,
    /// Shape at the open ends of stroked subpaths.
    pub line_cap: Cap,
    /// Requested shape at stroke corners. Corners are always drawn round.
    pub line_join: Join,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: PaintRef::Color(BLACK),
            stroke: PaintRef::None,
            stroke_width: 1.0,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            fill_rule: Fill::NonZero,
            line_cap: Cap::Butt,
            line_join: Join::Miter,
        }
    }
}

/// The properties [`Style::apply`] understands, in the order they are read from attributes.
pub(crate) const PROPERTIES: [&str; 9] = [
    "fill",
    "stroke",
    "stroke-width",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "fill-rule",
    "stroke-linecap",
    "stroke-linejoin",
];

impl Style {
    /// The style a child starts from before its own properties are applied.
    ///
    /// Every property is inherited except `opacity`, which groups apply as a whole.
    pub fn inherited(&self) -> Self {
        Self {
            opacity: 1.0,
            ..self.clone()
        }
    }

    /// Set one property from its textual value.
    ///
    /// Unknown properties, `inherit`, and values that cannot be parsed leave the style
    /// unchanged. Returns whether the property was understood.
    pub fn apply(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        if value == "inherit" {
            return PROPERTIES.contains(&name);
        }
        match name {
            "fill" => self.fill = PaintRef::parse(value),
            "stroke" => self.stroke = PaintRef::parse(value),
            "stroke-width" => set(&mut self.stroke_width, parse_length(value), name, value),
            "opacity" => set(&mut self.opacity, parse_opacity(value), name, value),
            "fill-opacity" => set(&mut self.fill_opacity, parse_opacity(value), name, value),
            "stroke-opacity" => set(&mut self.stroke_opacity, parse_opacity(value), name, value),
            "fill-rule" => {
                let rule = match value {
                    "nonzero" => Some(Fill::NonZero),
                    "evenodd" => Some(Fill::EvenOdd),
                    _ => None,
                };
                set(&mut self.fill_rule, rule, name, value);
            }
            "stroke-linecap" => {
                let cap = match value {
                    "butt" => Some(Cap::Butt),
                    "round" => Some(Cap::Round),
                    "square" => Some(Cap::Square),
                    _ => None,
                };
                set(&mut self.line_cap, cap, name, value);
            }
            "stroke-linejoin" => {
                let join = match value {
                    "miter" | "miter-clip" | "arcs" => Some(Join::Miter),
                    "round" => Some(Join::Round),
                    "bevel" => Some(Join::Bevel),
                    _ => None,
                };
                set(&mut self.line_join, join, name, value);
            }
            _ => return false,
        }
        true
    }
}

fn set<T>(slot: &mut T, parsed: Option<T>, name: &str, value: &str) {
    match parsed {
        Some(v) => *slot = v,
        None => debug!("ignoring invalid {name} value {value:?}"),
    }
}

/// Split an inline `style` attribute into `(property, value)` pairs.
pub(crate) fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        Some((name.trim(), value.trim()))
    })
}

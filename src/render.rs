//
// Copyright 2020, Gobsmacked Labs, LLC.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Draws a curve as a polyline on a square canvas and writes it out as SVG.
//!
//! ```
//! use hilbert_curve::render::{CanvasConfig, Polyline};
//!
//! let config = CanvasConfig::default();
//! let line = Polyline::for_order(2, &config).unwrap();
//! let svg = line.to_svg(&config);
//!
//! assert_eq!(line.segments().count(), 15);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::error::{CurveError, Result};
use crate::hilbert::generate::{check_generate_order, HilbertPoints};
use crate::hilbert::h_2;
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write};
use tracing::trace;

/// Canvas layout and stroke style.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Width and height in pixels.
    pub size: f64,
    /// Empty border kept on every side.
    pub margin: f64,
    /// SVG stroke color.
    pub stroke: String,
    /// Line width in pixels.
    pub stroke_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            size: 500.0,
            margin: 20.0,
            stroke: "blue".to_string(),
            stroke_width: 2.0,
        }
    }
}

impl CanvasConfig {
    fn check(&self) -> Result<()> {
        let usable = self.size.is_finite() && self.margin >= 0.0 && self.size > 2.0 * self.margin;
        if usable {
            Ok(())
        } else {
            Err(CurveError::InvalidCanvas {
                size: self.size,
                margin: self.margin,
            })
        }
    }
}

/// The cells of a curve scaled onto a canvas, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Scale every cell of the order `order` curve into the canvas. The first
    /// and last columns and rows land on the margins.
    pub fn for_order(order: u32, config: &CanvasConfig) -> Result<Self> {
        check_generate_order(order)?;
        config.check()?;
        if order == 0 {
            return Err(CurveError::NothingToDraw);
        }

        let max_coord = (h_2::side(order) - 1) as f64;
        let scale = (config.size - 2.0 * config.margin) / max_coord;

        let points: Vec<(f64, f64)> = HilbertPoints::new(order)?
            .map(|(x, y)| {
                (
                    config.margin + scale * f64::from(x),
                    config.margin + scale * f64::from(y),
                )
            })
            .collect();

        trace!(order, points = points.len(), scale, "scaled curve onto canvas");

        Ok(Polyline { points })
    }

    /// Canvas points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consecutive point pairs, one per drawn line.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Write an SVG document with one `<line>` per segment.
    pub fn write_svg<W: Write>(&self, config: &CanvasConfig, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            size = config.size
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        for ((x0, y0), (x1, y1)) in self.segments() {
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                x0,
                y0,
                x1,
                y1,
                Escaped(&config.stroke),
                config.stroke_width
            )?;
        }
        writeln!(out, "</svg>")
    }

    /// `write_svg` into a new `String`.
    #[must_use]
    pub fn to_svg(&self, config: &CanvasConfig) -> String {
        let mut svg = String::with_capacity(64 * self.points.len());
        self.write_svg(config, &mut svg)
            .expect("writing to a String does not fail");
        svg
    }
}

/// Writes text for an XML attribute value.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(at) = rest.find(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
            f.write_str(&rest[..at])?;
            let entity = match rest.as_bytes()[at] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&apos;",
            };
            f.write_str(entity)?;
            rest = &rest[at + 1..];
        }
        f.write_str(rest)
    }
}

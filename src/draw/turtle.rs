//! Minimal turtle geometry
//!
//! Tracks position and heading the way classic turtle graphics do (origin at
//! the centre, heading east, y axis up, angles in degrees, positive turns are
//! counter-clockwise) and records the strokes so they can be rendered as SVG.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One continuous pen stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
    pub filled: bool,
}

#[derive(Debug, Clone)]
pub struct Turtle {
    position: Point,
    heading: f64,
    current: Path,
    paths: Vec<Path>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    pub fn new() -> Self {
        let origin = Point { x: 0.0, y: 0.0 };
        Self {
            position: origin,
            heading: 0.0,
            current: Path {
                points: vec![origin],
                filled: false,
            },
            paths: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Heading in degrees, normalized to [0, 360)
    pub fn heading(&self) -> f64 {
        self.heading.rem_euclid(360.0)
    }

    pub fn forward(&mut self, distance: f64) {
        let radians = self.heading.to_radians();
        self.position = Point {
            x: self.position.x + distance * radians.cos(),
            y: self.position.y + distance * radians.sin(),
        };
        self.current.points.push(self.position);
    }

    pub fn left(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    pub fn right(&mut self, degrees: f64) {
        self.heading -= degrees;
    }

    /// Arc with its centre `radius` units to the left; negative radius runs
    /// clockwise. `extent` is in degrees.
    pub fn circle(&mut self, radius: f64, extent: f64) {
        let fraction = extent.abs() / 360.0;
        let steps = 1 + ((11.0 + radius.abs() / 6.0).min(59.0) * fraction) as usize;
        let mut w = extent / steps as f64;
        let mut w2 = 0.5 * w;
        let mut l = 2.0 * radius * (w2.to_radians()).sin();
        if radius < 0.0 {
            l = -l;
            w = -w;
            w2 = -w2;
        }

        self.left(w2);
        for _ in 0..steps {
            self.forward(l);
            self.left(w);
        }
        self.left(-w2);
    }

    pub fn begin_fill(&mut self) {
        self.break_path();
        self.current.filled = true;
    }

    pub fn end_fill(&mut self) {
        self.break_path();
    }

    fn break_path(&mut self) {
        let next = Path {
            points: vec![self.position],
            filled: false,
        };
        let done = std::mem::replace(&mut self.current, next);
        if done.points.len() > 1 {
            self.paths.push(done);
        }
    }

    /// Finish drawing and return every stroke
    pub fn into_paths(mut self) -> Vec<Path> {
        self.break_path();
        self.paths
    }
}

fn escape_attr(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&apos;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

/// Render strokes as a standalone SVG document
pub fn to_svg(paths: &[Path], color: &str, title: &str) -> String {
    const MARGIN: f64 = 20.0;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for p in paths.iter().flat_map(|path| path.points.iter()) {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let width = (max_x - min_x) + 2.0 * MARGIN;
    let height = (max_y - min_y) + 2.0 * MARGIN;
    let color = escape_attr(color);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}" width="{:.0}" height="{:.0}">"#,
        min_x - MARGIN,
        -max_y - MARGIN,
        width,
        height,
        width,
        height
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_attr(title));
    for path in paths {
        // SVG y grows downwards
        let points: Vec<String> = path
            .points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, -p.y))
            .collect();
        let fill = if path.filled { color.as_str() } else { "none" };
        let _ = writeln!(
            svg,
            r#"  <polyline points="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            points.join(" "),
            fill,
            color
        );
    }
    svg.push_str("</svg>\n");
    svg
}

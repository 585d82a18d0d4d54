//! Drawing
//!
//! Shapes are traced with a small turtle and written out as SVG files.
//! Rendering runs on the blocking thread pool; every submission hands back a
//! `DrawTicket` that resolves to the saved file or the failure.

pub mod turtle;

use crate::error::{LexError, LexResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use turtle::Turtle;

pub const SHAPE_HELP: &str =
    "Shape not recognized. Use square, triangle, circle, star, heart, spiral, polygon:n, flower:n";

const DEFAULT_PETALS: u32 = 6;
pub const MAX_SIDES: u32 = 360;
pub const MAX_PETALS: u32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Square,
    Triangle,
    Circle,
    Star,
    Heart,
    Spiral,
    Polygon(u32),
    Flower(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("Polygon must have at least 3 sides.")]
    TooFewSides,
    #[error("Invalid polygon format. Use polygon:n")]
    InvalidPolygon,
    #[error("Polygon can have at most {} sides.", MAX_SIDES)]
    TooManySides,
    #[error("Flower can have at most {} petals.", MAX_PETALS)]
    TooManyPetals,
    #[error("{}", SHAPE_HELP)]
    Unknown,
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let shape = match s.as_str() {
            "square" => Shape::Square,
            "triangle" => Shape::Triangle,
            "circle" => Shape::Circle,
            "star" => Shape::Star,
            "heart" => Shape::Heart,
            "spiral" => Shape::Spiral,
            other if other.starts_with("polygon") => {
                let sides: u64 = other
                    .split(':')
                    .nth(1)
                    .and_then(|n| n.trim().parse().ok())
                    .ok_or(ShapeError::InvalidPolygon)?;
                match u32::try_from(sides) {
                    Ok(n) if n < 3 => return Err(ShapeError::TooFewSides),
                    Ok(n) if n <= MAX_SIDES => Shape::Polygon(n),
                    _ => return Err(ShapeError::TooManySides),
                }
            }
            other if other.starts_with("flower") => {
                let petals = other
                    .split(':')
                    .nth(1)
                    .and_then(|n| n.trim().parse().ok())
                    .filter(|&n: &u64| n > 0)
                    .unwrap_or(DEFAULT_PETALS as u64);
                match u32::try_from(petals) {
                    Ok(n) if n <= MAX_PETALS => Shape::Flower(n),
                    _ => return Err(ShapeError::TooManyPetals),
                }
            }
            _ => return Err(ShapeError::Unknown),
        };
        Ok(shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Square => f.write_str("square"),
            Shape::Triangle => f.write_str("triangle"),
            Shape::Circle => f.write_str("circle"),
            Shape::Star => f.write_str("star"),
            Shape::Heart => f.write_str("heart"),
            Shape::Spiral => f.write_str("spiral"),
            Shape::Polygon(n) => write!(f, "polygon:{}", n),
            Shape::Flower(n) => write!(f, "flower:{}", n),
        }
    }
}

/// Everything needed to render one drawing
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub id: u64,
    pub shape: Shape,
    pub color: String,
    pub size: u32,
    /// 1 (slow) - 10 (fast); kept as metadata, a still image has no speed
    pub speed: u32,
}

/// Trace the shape and return its strokes
pub fn trace(shape: Shape, size: f64) -> Vec<turtle::Path> {
    let mut t = Turtle::new();
    match shape {
        Shape::Square => {
            for _ in 0..4 {
                t.forward(size);
                t.right(90.0);
            }
        }
        Shape::Triangle => {
            for _ in 0..3 {
                t.forward(size);
                t.left(120.0);
            }
        }
        Shape::Circle => t.circle(size, 360.0),
        Shape::Star => {
            for _ in 0..5 {
                t.forward(size);
                t.right(144.0);
            }
        }
        Shape::Heart => {
            t.begin_fill();
            t.left(140.0);
            t.forward(size);
            t.circle(-size / 2.0, 200.0);
            t.left(120.0);
            t.circle(-size / 2.0, 200.0);
            t.forward(size);
            t.end_fill();
        }
        Shape::Spiral => {
            for i in 0..60 {
                t.forward(i as f64 * 3.0);
                t.right(91.0);
            }
        }
        Shape::Polygon(sides) => {
            let angle = 360.0 / sides as f64;
            for _ in 0..sides {
                t.forward(size);
                t.right(angle);
            }
        }
        Shape::Flower(petals) => {
            let radius = (size / 2.0).floor();
            for _ in 0..petals {
                t.circle(radius, 360.0);
                t.left(360.0 / petals as f64);
            }
        }
    }
    t.into_paths()
}

fn file_name(request: &DrawRequest) -> String {
    format!(
        "drawing_{}_{}.svg",
        request.id,
        request.shape.to_string().replace(':', "-")
    )
}

/// Render a request into `out_dir`, returning the written file
pub fn render_to_file(request: &DrawRequest, out_dir: &Path) -> LexResult<PathBuf> {
    let paths = trace(request.shape, request.size as f64);
    if paths.is_empty() {
        return Err(LexError::Draw(format!("{} produced no strokes", request.shape)));
    }

    let title = format!(
        "{} in {} (size {}, speed {})",
        request.shape, request.color, request.size, request.speed
    );
    let svg = turtle::to_svg(&paths, &request.color, &title);

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name(request));
    std::fs::write(&path, svg)?;
    debug!("Wrote {} strokes to {}", paths.len(), path.display());
    Ok(path)
}

/// Pending drawing; resolves once the worker finishes
#[derive(Debug)]
pub struct DrawTicket {
    pub request: DrawRequest,
    handle: JoinHandle<LexResult<PathBuf>>,
}

impl DrawTicket {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the drawing; a panicked worker is reported as a failure
    pub async fn wait(self) -> (DrawRequest, LexResult<PathBuf>) {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(LexError::Draw(format!("drawing worker failed: {}", e))),
        };
        (self.request, result)
    }
}

/// Submits drawings to the blocking worker pool
#[derive(Debug, Clone)]
pub struct Painter {
    out_dir: PathBuf,
}

impl Painter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Must be called from within a tokio runtime
    pub fn submit(&self, request: DrawRequest) -> DrawTicket {
        info!(
            "🎨 Drawing {} in {} size {} speed {}",
            request.shape, request.color, request.size, request.speed
        );
        let out_dir = self.out_dir.clone();
        let job = request.clone();
        let handle = tokio::task::spawn_blocking(move || render_to_file(&job, &out_dir));
        DrawTicket { request, handle }
    }
}

use super::canvas::{Canvas, TextAnchor};
use super::{Metric, Surfaces};
use crate::Result;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        color: String,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
        color: String,
        anchor: TextAnchor,
    },
}

/// Canvas double that keeps the full op history (clears included) so tests
/// can assert geometry and repaint idempotence.
#[derive(Debug)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn lines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect()
    }

    pub fn polylines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Polyline { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: color.to_string(),
        });
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn text(&mut self, content: &str, x: f64, y: f64, color: &str, anchor: TextAnchor) {
        self.ops.push(DrawOp::Text {
            content: content.to_string(),
            x,
            y,
            color: color.to_string(),
            anchor,
        });
    }
}

/// Recording backend for all six surfaces.
pub struct RecordingSurfaces {
    canvases: Vec<(Metric, RecordingCanvas)>,
    commits: Vec<Metric>,
}

impl RecordingSurfaces {
    pub fn new(width: f64, height: f64) -> Self {
        let canvases = Metric::ALL
            .iter()
            .map(|&metric| (metric, RecordingCanvas::new(width, height)))
            .collect();
        Self {
            canvases,
            commits: Vec::new(),
        }
    }

    pub fn canvas_for(&self, metric: Metric) -> &RecordingCanvas {
        self.canvases
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, c)| c)
            .expect("all metrics have a canvas")
    }

    pub fn commits(&self) -> &[Metric] {
        &self.commits
    }
}

impl Surfaces for RecordingSurfaces {
    fn canvas(&mut self, metric: Metric) -> &mut dyn Canvas {
        self.canvases
            .iter_mut()
            .find(|(m, _)| *m == metric)
            .map(|(_, c)| c as &mut dyn Canvas)
            .expect("all metrics have a canvas")
    }

    fn commit(&mut self, metric: Metric) -> Result<()> {
        self.commits.push(metric);
        Ok(())
    }
}

//! SVG canvas backend: each chart surface is one SVG document, rewritten on
//! every commit under `<out_dir>/<chart_id>.svg`.

use std::fs;
use std::path::{Path, PathBuf};

use super::canvas::{Canvas, TextAnchor};
use super::{Metric, Surfaces};
use crate::Result;

const FONT_SIZE: u32 = 10;

pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: Vec::new(),
        }
    }

    /// Serialize the current frame as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\" font-family=\"sans-serif\" font-size=\"{}\">\n",
            self.width, self.height, self.width, self.height, FONT_SIZE
        ));
        for element in &self.body {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) {
        self.body.push(format!(
            "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{color}\"/>"
        ));
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str) {
        let coords = points
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");
        self.body.push(format!(
            "<polyline points=\"{coords}\" fill=\"none\" stroke=\"{color}\"/>"
        ));
    }

    fn text(&mut self, content: &str, x: f64, y: f64, color: &str, anchor: TextAnchor) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.body.push(format!(
            "<text x=\"{x}\" y=\"{y}\" fill=\"{color}\" text-anchor=\"{anchor}\">{}</text>",
            escape(content)
        ));
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Six SVG surfaces written under one output directory.
pub struct SvgSurfaces {
    out_dir: PathBuf,
    canvases: Vec<(Metric, SvgCanvas)>,
}

impl SvgSurfaces {
    pub fn new(out_dir: &Path, width: f64, height: f64) -> Result<Self> {
        fs::create_dir_all(out_dir)?;
        let canvases = Metric::ALL
            .iter()
            .map(|&metric| (metric, SvgCanvas::new(width, height)))
            .collect();
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            canvases,
        })
    }

    pub fn path_for(&self, metric: Metric) -> PathBuf {
        self.out_dir.join(format!("{}.svg", metric.chart_id()))
    }
}

impl Surfaces for SvgSurfaces {
    fn canvas(&mut self, metric: Metric) -> &mut dyn Canvas {
        self.canvases
            .iter_mut()
            .find(|(m, _)| *m == metric)
            .map(|(_, c)| c as &mut dyn Canvas)
            .expect("all metrics have a canvas")
    }

    fn commit(&mut self, metric: Metric) -> Result<()> {
        let document = self
            .canvases
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, c)| c.to_svg())
            .expect("all metrics have a canvas");
        fs::write(self.path_for(metric), document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drops_previous_frame() {
        let mut canvas = SvgCanvas::new(400.0, 200.0);
        canvas.line(0.0, 0.0, 10.0, 10.0, "#000000");
        canvas.clear();
        canvas.line(1.0, 1.0, 2.0, 2.0, "#cc5555");
        let svg = canvas.to_svg();
        assert!(!svg.contains("x2=\"10\""));
        assert!(svg.contains("stroke=\"#cc5555\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut canvas = SvgCanvas::new(400.0, 200.0);
        canvas.text("1 tick < 2", 5.0, 5.0, "#333333", TextAnchor::Start);
        assert!(canvas.to_svg().contains("1 tick &lt; 2"));
    }

    #[test]
    fn commit_writes_one_file_per_metric() {
        let dir = tempfile::tempdir().unwrap();
        let mut surfaces = SvgSurfaces::new(dir.path(), 400.0, 200.0).unwrap();
        for metric in Metric::ALL {
            surfaces.canvas(metric).line(0.0, 0.0, 1.0, 1.0, "#000000");
            surfaces.commit(metric).unwrap();
        }
        for metric in Metric::ALL {
            assert!(surfaces.path_for(metric).exists(), "{:?}", metric);
        }
    }
}

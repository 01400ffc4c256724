/// Horizontal alignment for canvas text, matching the renderer's three
/// label positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Minimal drawing surface the chart renderer targets. Backends are swappable
/// (SVG files for the binary, an op recorder for tests); coordinates are in
/// surface pixels with the origin at the top-left.
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Wipe the surface. Every repaint starts here so repeated renders of the
    /// same inputs produce the same output.
    fn clear(&mut self);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str);

    fn polyline(&mut self, points: &[(f64, f64)], color: &str);

    fn text(&mut self, content: &str, x: f64, y: f64, color: &str, anchor: TextAnchor);
}

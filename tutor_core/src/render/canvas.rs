//! Drawing primitives for diagram layouts
//!
//! A [`Frame`] records strokes, fills and text in page points (origin top
//! left, y down) and serializes them to Typst markup with
//! [`Frame::into_source`].

use std::fmt::Write as _;

/// A point in page coordinates (pt)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// RGBA color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);

    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    fn to_typst(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgb(\"#{:02x}{:02x}{:02x}{:02x}\")",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a)
        )
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dashed: false,
        }
    }
}

impl Stroke {
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    pub fn dashed(self) -> Self {
        Self { dashed: true, ..self }
    }

    fn to_typst(self) -> String {
        let dash = if self.dashed { ", dash: \"dashed\"" } else { "" };
        format!(
            "(paint: {}, thickness: {:.2}pt{})",
            self.color.to_typst(),
            self.width,
            dash
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Polyline { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f32 },
}

/// Geometry made of polylines and circles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

/// Incremental path construction, see [`Path::new`]
#[derive(Debug, Default)]
pub struct Builder {
    segments: Vec<Segment>,
}

impl Builder {
    /// Start a new subpath
    pub fn move_to(&mut self, point: Point) {
        self.segments.push(Segment::Polyline {
            points: vec![point],
            closed: false,
        });
    }

    pub fn line_to(&mut self, point: Point) {
        match self.segments.last_mut() {
            Some(Segment::Polyline { points, closed: false }) => points.push(point),
            _ => self.move_to(point),
        }
    }

    /// Close the current subpath
    pub fn close(&mut self) {
        if let Some(Segment::Polyline { closed, .. }) = self.segments.last_mut() {
            *closed = true;
        }
    }

    pub fn circle(&mut self, center: Point, radius: f32) {
        self.segments.push(Segment::Circle { center, radius });
    }
}

impl Path {
    pub fn new(build: impl FnOnce(&mut Builder)) -> Self {
        let mut builder = Builder::default();
        build(&mut builder);
        Self {
            segments: builder.segments,
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new(|b| {
            b.move_to(from);
            b.line_to(to);
        })
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new(|b| b.circle(center, radius))
    }

    pub fn rectangle(top_left: Point, width: f32, height: f32) -> Self {
        Self::polygon(&[
            top_left,
            top_left.offset(width, 0.0),
            top_left.offset(width, height),
            top_left.offset(0.0, height),
        ])
    }

    /// Closed polygon through the given corners
    pub fn polygon(corners: &[Point]) -> Self {
        Self::new(|b| {
            if let Some((first, rest)) = corners.split_first() {
                b.move_to(*first);
                for point in rest {
                    b.line_to(*point);
                }
                b.close();
            }
        })
    }

    /// Open polyline through the given points
    pub fn polyline(points: &[Point]) -> Self {
        Self::new(|b| {
            if let Some((first, rest)) = points.split_first() {
                b.move_to(*first);
                for point in rest {
                    b.line_to(*point);
                }
            }
        })
    }
}

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// A text label; `position` is the anchor point, vertically centered
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: Point,
    pub color: Color,
    pub size: f32,
    pub bold: bool,
    pub align_x: Align,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            position: Point::default(),
            color: Color::BLACK,
            size: 9.0,
            bold: false,
            align_x: Align::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Primitive {
    Fill(Path, Color),
    Stroke(Path, Stroke),
    Text(Text),
}

/// A page-sized drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: f32,
    height: f32,
    primitives: Vec<Primitive>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn fill(&mut self, path: &Path, color: Color) {
        self.primitives.push(Primitive::Fill(path.clone(), color));
    }

    pub fn stroke(&mut self, path: &Path, stroke: Stroke) {
        self.primitives.push(Primitive::Stroke(path.clone(), stroke));
    }

    pub fn fill_text(&mut self, text: Text) {
        self.primitives.push(Primitive::Text(text));
    }

    /// All text placed on the frame, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(text) => Some(text.content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded primitives
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Draw a straight arrow from `from` to `to` with a filled head at `to`
    pub fn arrow(&mut self, from: Point, to: Point, stroke: Stroke, head: f32) {
        self.stroke(&Path::line(from, to), stroke);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let length = (dx * dx + dy * dy).sqrt();
        if length < f32::EPSILON {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);
        let back = Point::new(to.x - ux * head, to.y - uy * head);
        let (px, py) = (-uy * head * 0.5, ux * head * 0.5);
        let barbs = Path::polygon(&[to, back.offset(px, py), back.offset(-px, -py)]);
        self.fill(&barbs, stroke.color);
    }

    /// Serialize to a complete Typst document
    pub fn into_source(self) -> String {
        let mut source = format!(
            "#set page(width: {:.2}pt, height: {:.2}pt, margin: 0pt, fill: white)\n\
             #set text(size: 9pt)\n",
            self.width, self.height
        );
        for primitive in &self.primitives {
            match primitive {
                Primitive::Fill(path, color) => {
                    write_path(&mut source, path, Some(*color), None);
                }
                Primitive::Stroke(path, stroke) => {
                    write_path(&mut source, path, None, Some(*stroke));
                }
                Primitive::Text(text) => write_text(&mut source, text, self.width, self.height),
            }
        }
        source
    }
}

fn pt(point: Point) -> String {
    format!("({:.2}pt, {:.2}pt)", point.x, point.y)
}

fn paint(color: Option<Color>) -> String {
    color.map_or_else(|| "none".to_string(), Color::to_typst)
}

fn stroke_of(stroke: Option<Stroke>) -> String {
    stroke.map_or_else(|| "none".to_string(), Stroke::to_typst)
}

fn write_path(out: &mut String, path: &Path, fill: Option<Color>, stroke: Option<Stroke>) {
    for segment in &path.segments {
        match segment {
            Segment::Circle { center, radius } => {
                if !center.is_finite() || !radius.is_finite() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "#place(top + left, dx: {:.2}pt, dy: {:.2}pt, circle(radius: {:.2}pt, fill: {}, stroke: {}))",
                    center.x - radius,
                    center.y - radius,
                    radius,
                    paint(fill),
                    stroke_of(stroke)
                );
            }
            Segment::Polyline { points, closed } => {
                if points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
                    continue;
                }
                if *closed || fill.is_some() {
                    let vertices: Vec<String> = points.iter().map(|p| pt(*p)).collect();
                    let _ = writeln!(
                        out,
                        "#place(top + left, polygon(fill: {}, stroke: {}, {}))",
                        paint(fill),
                        stroke_of(stroke),
                        vertices.join(", ")
                    );
                } else {
                    for pair in points.windows(2) {
                        let _ = writeln!(
                            out,
                            "#place(top + left, line(start: {}, end: {}, stroke: {}))",
                            pt(pair[0]),
                            pt(pair[1]),
                            stroke_of(stroke)
                        );
                    }
                }
            }
        }
    }
}

fn write_text(out: &mut String, text: &Text, page_width: f32, page_height: f32) {
    if !text.position.is_finite() || text.content.is_empty() {
        return;
    }
    let lines: Vec<String> = text
        .content
        .lines()
        .map(|line| format!("#{}", typst_string(line)))
        .collect();
    let weight = if text.bold { "bold" } else { "regular" };
    // place() offsets are measured from the anchor on the page, with the
    // label's vertical center on the page's horizontal midline
    let (anchor, dx) = match text.align_x {
        Align::Start => ("left", text.position.x),
        Align::Center => ("center", text.position.x - page_width / 2.0),
        Align::End => ("right", text.position.x - page_width),
    };
    let _ = writeln!(
        out,
        "#place({anchor} + horizon, dx: {:.2}pt, dy: {:.2}pt, align({anchor}, text(size: {:.1}pt, fill: {}, weight: \"{}\")[{}]))",
        dx,
        text.position.y - page_height / 2.0,
        text.size,
        text.color.to_typst(),
        weight,
        lines.join(" #linebreak() ")
    );
}

/// Quote a string as a Typst string literal
pub fn typst_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' | '\t' => quoted.push(' '),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_rgb(1.0, 0.0, 0.5).to_typst(), "rgb(\"#ff0080ff\")");
        let faded = Color { a: 0.3, ..Color::BLACK };
        assert_eq!(faded.to_typst(), "rgb(\"#0000004d\")");
    }

    #[test]
    fn test_open_path_strokes_as_lines() {
        let mut frame = Frame::new(100.0, 50.0);
        let path = Path::polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
        frame.stroke(&path, Stroke::default().dashed());
        let source = frame.into_source();
        assert_eq!(source.matches("line(start:").count(), 2);
        assert!(source.contains("dash: \"dashed\""));
        assert!(source.starts_with("#set page(width: 100.00pt, height: 50.00pt"));
    }

    #[test]
    fn test_fill_emits_polygon() {
        let mut frame = Frame::new(100.0, 50.0);
        frame.fill(&Path::rectangle(Point::new(5.0, 5.0), 10.0, 20.0), Color::WHITE);
        let source = frame.into_source();
        assert!(source.contains("polygon(fill: rgb(\"#ffffffff\"), stroke: none, (5.00pt, 5.00pt)"));
    }

    #[test]
    fn test_non_finite_geometry_is_skipped() {
        let mut frame = Frame::new(100.0, 50.0);
        frame.stroke(&Path::line(Point::new(0.0, f32::NAN), Point::new(1.0, 1.0)), Stroke::default());
        frame.stroke(&Path::circle(Point::new(3.0, 3.0), f32::INFINITY), Stroke::default());
        let source = frame.into_source();
        assert!(!source.contains("line("));
        assert!(!source.contains("circle("));
    }

    #[test]
    fn test_text_is_quoted_and_split_into_lines() {
        let mut frame = Frame::new(200.0, 100.0);
        frame.fill_text(Text {
            content: "Visual for:\n\"SM_9\" #x".to_string(),
            position: Point::new(100.0, 50.0),
            align_x: Align::Center,
            ..Text::default()
        });
        assert_eq!(frame.texts(), vec!["Visual for:\n\"SM_9\" #x"]);
        let source = frame.into_source();
        assert!(source.contains("#place(center + horizon, dx: 0.00pt, dy: 0.00pt"));
        assert!(source.contains("[#\"Visual for:\" #linebreak() #\"\\\"SM_9\\\" #x\"]"));
    }

    #[test]
    fn test_arrow_has_head() {
        let mut frame = Frame::new(100.0, 100.0);
        frame.arrow(Point::new(0.0, 0.0), Point::new(0.0, 40.0), Stroke::default(), 6.0);
        assert_eq!(frame.len(), 2);
        // Degenerate arrows draw only the shaft
        frame.arrow(Point::new(5.0, 5.0), Point::new(5.0, 5.0), Stroke::default(), 6.0);
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn test_typst_string_escapes() {
        assert_eq!(typst_string("a\\b\"c"), "\"a\\\\b\\\"c\"");
    }
}

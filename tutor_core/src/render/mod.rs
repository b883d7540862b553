//! # Diagram Renderer
//!
//! Chooses a [`DiagramLayout`] for the active topic, draws it on a
//! [`Frame`](canvas::Frame) and rasterizes the result to PNG.
//!
//! Rendering never fails. A compile or encode failure falls back to the
//! placeholder diagram, and a placeholder failure falls back to a blank
//! white raster.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tutor_core::evaluator::evaluate;
//! use tutor_core::inputs::SliderInputs;
//! use tutor_core::render::render;
//! use tutor_core::topics::LabTopic;
//!
//! let topic = LabTopic::ShearAndMoment;
//! let inputs = SliderInputs::defaults(topic);
//! let derived = evaluate(topic, &inputs)?;
//! let png = render(topic, &inputs, &derived);
//! std::fs::write("beam.png", png).unwrap();
//! # Ok::<(), tutor_core::errors::TutorError>(())
//! ```

pub mod canvas;
pub mod world;

mod beam;
mod material;
mod mohr;
mod schematic;

use serde::{Deserialize, Serialize};

use crate::evaluator::DerivedQuantities;
use crate::inputs::SliderInputs;
use crate::settings::RenderSettings;
use crate::topics::LabTopic;

use canvas::{Align, Color, Frame, Path, Point, Stroke, Text};

pub use world::{blank_png, rasterize};

/// Diagram arrangement for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagramLayout {
    /// Reference stress-strain curve with the operating point
    StressStrain,
    /// Axially loaded bar
    AxialSchematic,
    /// Circular shaft cross-section under torque
    ShaftSection,
    /// Beam schematic over shear and moment diagrams
    BeamPanels,
    /// Mohr's circle and three stress elements
    MohrPanels,
    /// "Visual for: ..." text only
    Placeholder,
}

impl DiagramLayout {
    /// Layout a topic uses when its inputs and results are consistent
    pub fn for_topic(topic: LabTopic) -> Self {
        match topic {
            LabTopic::DirectStress => DiagramLayout::AxialSchematic,
            LabTopic::MaterialProperties => DiagramLayout::StressStrain,
            LabTopic::Torsion => DiagramLayout::ShaftSection,
            LabTopic::ShearAndMoment | LabTopic::BendingStress | LabTopic::BeamDeflection => {
                DiagramLayout::BeamPanels
            }
            LabTopic::CombinedLoading => DiagramLayout::MohrPanels,
        }
    }
}

/// Pick the layout for a topic, or the placeholder when the inputs or
/// derived record belong to another topic.
pub fn select_layout(topic: LabTopic, inputs: &SliderInputs, derived: &DerivedQuantities) -> DiagramLayout {
    if inputs.fits(topic) && derived.fits(topic) {
        DiagramLayout::for_topic(topic)
    } else {
        log::warn!(
            "{}: inputs ({}) or results do not match the topic, drawing placeholder",
            topic.id(),
            inputs.kind().name()
        );
        DiagramLayout::Placeholder
    }
}

/// Build the diagram scene without rasterizing it
pub fn draw(
    settings: &RenderSettings,
    topic: LabTopic,
    inputs: &SliderInputs,
    derived: &DerivedQuantities,
) -> Frame {
    let layout = select_layout(topic, inputs, derived);
    log::debug!("{}: drawing {:?}", topic.id(), layout);

    let mut frame = Frame::new(settings.width_pt, settings.height_pt);
    match (layout, derived) {
        (DiagramLayout::StressStrain, DerivedQuantities::MaterialResponse(response)) => {
            material::draw(&mut frame, topic, response)
        }
        (DiagramLayout::AxialSchematic, DerivedQuantities::DirectStress(result)) => {
            schematic::draw_axial(&mut frame, topic, result)
        }
        (DiagramLayout::ShaftSection, DerivedQuantities::Torsion(result)) => {
            schematic::draw_shaft(&mut frame, topic, result)
        }
        (DiagramLayout::BeamPanels, DerivedQuantities::Beam(result)) => {
            beam::draw(&mut frame, topic, result, settings.beam_samples)
        }
        (DiagramLayout::MohrPanels, DerivedQuantities::Mohr(circle)) => mohr::draw(&mut frame, topic, circle),
        _ => draw_placeholder(&mut frame, topic.title()),
    }
    frame
}

/// Render with default settings
pub fn render(topic: LabTopic, inputs: &SliderInputs, derived: &DerivedQuantities) -> Vec<u8> {
    render_with(&RenderSettings::default(), topic, inputs, derived)
}

/// Render the diagram for a topic to PNG bytes
pub fn render_with(
    settings: &RenderSettings,
    topic: LabTopic,
    inputs: &SliderInputs,
    derived: &DerivedQuantities,
) -> Vec<u8> {
    let settings = &settings.clamped();
    let frame = draw(settings, topic, inputs, derived);
    match rasterize(frame.into_source(), settings.pixel_per_pt) {
        Ok(png) => png,
        Err(error) => {
            log::warn!("{}: diagram failed, drawing placeholder: {}", topic.id(), error);
            render_placeholder(settings, topic.title())
        }
    }
}

/// Render from a raw lab id; unknown ids get the placeholder
pub fn render_lab(lab_id: &str, inputs: &SliderInputs, derived: &DerivedQuantities) -> Vec<u8> {
    let settings = RenderSettings::default();
    match LabTopic::from_id(lab_id) {
        Ok(topic) => render_with(&settings, topic, inputs, derived),
        Err(error) => {
            log::warn!("{}, drawing placeholder", error);
            render_placeholder(&settings, lab_id.trim())
        }
    }
}

/// Render the "Visual for: ..." placeholder
pub fn render_placeholder(settings: &RenderSettings, label: &str) -> Vec<u8> {
    let settings = &settings.clamped();
    let mut frame = Frame::new(settings.width_pt, settings.height_pt);
    draw_placeholder(&mut frame, label);
    match rasterize(frame.into_source(), settings.pixel_per_pt) {
        Ok(png) => png,
        Err(error) => {
            log::warn!("placeholder failed, using blank raster: {}", error);
            let (width, height) = settings.pixel_size();
            blank_png(width, height)
        }
    }
}

fn draw_placeholder(frame: &mut Frame, label: &str) {
    let center = Point::new(frame.width() / 2.0, frame.height() / 2.0);
    frame.stroke(
        &Path::rectangle(Point::new(10.0, 10.0), frame.width() - 20.0, frame.height() - 20.0),
        Stroke::default().with_color(AXIS).dashed(),
    );
    frame.fill_text(Text {
        content: format!("Visual for:\n{}", label),
        position: center,
        color: INK,
        size: 14.0,
        align_x: Align::Center,
        ..Text::default()
    });
}

// ============================================================================
// Shared palette and panel geometry
// ============================================================================

const INK: Color = Color::from_rgb(0.15, 0.15, 0.2);
const AXIS: Color = Color::from_rgb(0.6, 0.6, 0.6);
const LOAD: Color = Color::from_rgb(0.8, 0.15, 0.15);
const REACTION: Color = Color::from_rgb(0.7, 0.2, 0.2);
const SHEAR: Color = Color::from_rgb(0.2, 0.4, 0.8);
const MOMENT: Color = Color::from_rgb(0.85, 0.45, 0.1);
const DEFLECTION: Color = Color::from_rgb(0.25, 0.6, 0.3);
const MEMBER: Color = Color::from_rgb(0.85, 0.88, 0.95);

/// A rectangular region of the page
#[derive(Debug, Clone, Copy, PartialEq)]
struct Panel {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Panel {
    fn page(frame: &Frame) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: frame.width(),
            height: frame.height(),
        }
    }

    fn inset(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(1.0),
            height: (self.height - top - bottom).max(1.0),
        }
    }

    /// Equal-height horizontal strips, top to bottom
    fn rows(self, count: usize) -> Vec<Panel> {
        self.grid(count, 1)
    }

    /// Equal cells in row-major order
    fn grid(self, rows: usize, cols: usize) -> Vec<Panel> {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let cell_w = self.width / cols as f32;
        let cell_h = self.height / rows as f32;
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| Panel {
                x: self.x + c as f32 * cell_w,
                y: self.y + r as f32 * cell_h,
                width: cell_w,
                height: cell_h,
            })
            .collect()
    }

    fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Bold caption centered along the top edge
    fn title(&self, frame: &mut Frame, content: impl Into<String>, size: f32) {
        frame.fill_text(Text {
            content: content.into(),
            position: Point::new(self.x + self.width / 2.0, self.y + size * 0.8),
            color: INK,
            size,
            bold: true,
            align_x: Align::Center,
        });
    }
}

/// Text helper for the common label case
fn label(frame: &mut Frame, content: impl Into<String>, position: Point, color: Color, align_x: Align) {
    frame.fill_text(Text {
        content: content.into(),
        position,
        color,
        size: 9.0,
        align_x,
        ..Text::default()
    });
}

/// Page heading shared by every layout
fn heading(frame: &mut Frame, topic: LabTopic) {
    let page = Panel::page(frame);
    page.title(frame, format!("{} ({})", topic.title(), topic.id()), 13.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;

    fn scene(topic: LabTopic) -> Frame {
        let inputs = SliderInputs::defaults(topic);
        let derived = evaluate(topic, &inputs).unwrap();
        draw(&RenderSettings::default(), topic, &inputs, &derived)
    }

    #[test]
    fn test_layout_per_topic() {
        for topic in LabTopic::ALL {
            let inputs = SliderInputs::defaults(topic);
            let derived = evaluate(topic, &inputs).unwrap();
            assert_eq!(select_layout(topic, &inputs, &derived), DiagramLayout::for_topic(topic));
        }
        assert_eq!(DiagramLayout::for_topic(LabTopic::BeamDeflection), DiagramLayout::BeamPanels);
    }

    #[test]
    fn test_mismatched_records_select_placeholder() {
        let inputs = SliderInputs::defaults(LabTopic::Torsion);
        let derived = evaluate(LabTopic::Torsion, &inputs).unwrap();
        assert_eq!(
            select_layout(LabTopic::DirectStress, &inputs, &derived),
            DiagramLayout::Placeholder
        );

        let frame = draw(&RenderSettings::default(), LabTopic::DirectStress, &inputs, &derived);
        assert_eq!(frame.texts(), vec!["Visual for:\nDirect Stress, Deformation, and Design"]);
    }

    #[test]
    fn test_every_layout_draws_a_heading() {
        for topic in LabTopic::ALL {
            let frame = scene(topic);
            let heading = format!("{} ({})", topic.title(), topic.id());
            assert!(frame.texts().contains(&heading.as_str()), "{} missing heading", topic.id());
        }
    }

    #[test]
    fn test_panel_grid() {
        let panels = Panel {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        }
        .grid(2, 2);
        assert_eq!(panels.len(), 4);
        assert_eq!(panels[3].x, 100.0);
        assert_eq!(panels[3].y, 50.0);
        assert_eq!(panels[1].center(), Point::new(150.0, 25.0));
    }
}

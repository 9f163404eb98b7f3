// PDF drawing surface backed by printpdf: a single page where one layout
// pixel maps to one PDF point (72 dpi), with the y axis flipped.

use printpdf::path::PaintMode;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::render::{DrawingSurface, Segment, TextAlign};
use crate::SheetError;

const PX_TO_MM: f32 = 25.4 / 72.0;

/// Approximate Helvetica advance width per character, in em. Close enough
/// for digits and single capital letters; printpdf exposes no metrics for
/// its builtin fonts.
const APPROX_ADVANCE_EM: f64 = 0.556;

pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    width: i32,
    height: i32,
}

impl PdfSurface {
    pub fn new(width: i32, height: i32) -> Result<Self, SheetError> {
        let (doc, page, layer) = PdfDocument::new(
            "Answer Sheet",
            Mm(width as f32 * PX_TO_MM),
            Mm(height as f32 * PX_TO_MM),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SheetError::PdfError(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfSurface {
            doc,
            layer,
            font,
            width,
            height,
        })
    }

    pub fn save(self, path: &Path) -> Result<(), SheetError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| SheetError::PdfError(e.to_string()))
    }

    fn x_mm(&self, x: f64) -> Mm {
        Mm(x as f32 * PX_TO_MM)
    }

    /// Layout y grows downward; PDF y grows upward from the bottom edge.
    fn y_mm(&self, y: f64) -> Mm {
        Mm((self.height as f64 - y) as f32 * PX_TO_MM)
    }
}

impl DrawingSurface for PdfSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) -> Result<(), SheetError> {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
        let page = Rect::new(
            Mm(0.0),
            Mm(0.0),
            self.x_mm(self.width as f64),
            Mm(self.height as f32 * PX_TO_MM),
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(page);
        // Everything after the background is black
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(1.0);
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), SheetError> {
        let rect = Rect::new(
            self.x_mm(x as f64),
            self.y_mm((y + h) as f64),
            self.x_mm((x + w) as f64),
            self.y_mm(y as f64),
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
        Ok(())
    }

    fn stroke_segments(&mut self, segments: &[Segment]) -> Result<(), SheetError> {
        for segment in segments {
            let points = vec![
                (
                    Point::new(self.x_mm(segment.from.x as f64), self.y_mm(segment.from.y as f64)),
                    false,
                ),
                (
                    Point::new(self.x_mm(segment.to.x as f64), self.y_mm(segment.to.y as f64)),
                    false,
                ),
            ];
            self.layer.add_line(Line {
                points,
                is_closed: false,
            });
        }
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        size: f64,
        align: TextAlign,
    ) -> Result<(), SheetError> {
        let text_width = text.chars().count() as f64 * size * APPROX_ADVANCE_EM;
        let anchor_x = match align {
            TextAlign::Left => x as f64,
            TextAlign::Center => x as f64 - text_width / 2.0,
            TextAlign::Right => x as f64 - text_width,
        };
        self.layer.use_text(
            text,
            size as f32,
            self.x_mm(anchor_x),
            self.y_mm(y as f64),
            &self.font,
        );
        Ok(())
    }
}

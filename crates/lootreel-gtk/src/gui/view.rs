use cairo::Context;
use lootreel::geometry::{Point, Rect};
use lootreel::render::{Canvas, Font, RectStyle, Stroke};
use palette::Srgba;

/// Drawing sink backed by the drawing area's cairo context.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn set_stroke(&self, stroke: &Stroke) {
        self.set_color(stroke.color);
        self.cr.set_line_width(stroke.width);
        if stroke.dashed {
            self.cr.set_dash(&[5.0, 5.0], 0.0);
        } else {
            self.cr.set_dash(&[], 0.0);
        }
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn rect(&mut self, rect: Rect, style: RectStyle) -> Result<(), cairo::Error> {
        self.cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        if let Some(fill) = style.fill {
            self.set_color(fill);
            if style.outline.is_some() {
                self.cr.fill_preserve()?;
            } else {
                self.cr.fill()?;
            }
        }
        if let Some(outline) = style.outline {
            self.set_stroke(&outline);
            self.cr.stroke()?;
        }
        self.cr.new_path();
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), cairo::Error> {
        self.set_stroke(&stroke);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }

    fn text(
        &mut self,
        at: Point,
        text: &str,
        font: Font,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let weight = if font.bold {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        self.set_color(color);
        self.cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
        // pt to px
        self.cr.set_font_size(font.size * 4.0 / 3.0);
        let ext = self.cr.text_extents(text)?;
        self.cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y + ext.height() / 2.0,
        );
        self.cr.show_text(text)
    }
}

use kurbo::{Circle, Line, Point, Shape};

use crate::{
    foundation::{color::Color, error::CartridgeResult},
    raster::{Bitmap, composite::paint_layer},
};

/// Dimensions of the decorative border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStyle {
    /// Diameter of the two terminal circles.
    pub circle_diameter: f64,
    /// Distance of the vertical rule from the left edge.
    pub margin_left: f64,
    /// Stroke width of lines and circles.
    pub stroke_width: f64,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            circle_diameter: 7.0,
            margin_left: 10.0,
            stroke_width: 2.0,
        }
    }
}

/// Resolved border shapes in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderGeometry {
    /// Circle left of the session label.
    pub start: Circle,
    /// Lead-in, vertical rule and bottom rule, in drawing order.
    pub rules: [Line; 3],
    /// Circle at the right end of the bottom rule.
    pub end: Circle,
}

impl BorderStyle {
    /// Border for a cartridge `width` wide whose session label is inset by `label_left` and
    /// whose session and signature fields are `session_height` and `signature_height` tall.
    ///
    /// The lead-in starts just left of the label at half the session height, the vertical
    /// rule runs down to one diameter above the signature's bottom, and the bottom rule
    /// ends one diameter short of the right edge.
    pub fn geometry(
        &self,
        width: u32,
        label_left: u32,
        session_height: u32,
        signature_height: u32,
    ) -> BorderGeometry {
        let c = self.circle_diameter;
        let r = c / 2.0;
        let label_left = f64::from(label_left);
        let top = f64::from(session_height) / 2.0;
        let bottom = f64::from(session_height) + f64::from(signature_height) - c;
        let right = f64::from(width) - c;

        BorderGeometry {
            start: Circle::new(Point::new(label_left - 2.0 * c - 1.0 + r, top), r),
            rules: [
                Line::new((label_left - 2.0 * c, top), (self.margin_left, top)),
                Line::new((self.margin_left, top), (self.margin_left, bottom)),
                Line::new((self.margin_left, bottom), (right, bottom)),
            ],
            end: Circle::new(Point::new(right + r, bottom), r),
        }
    }
}

/// Stroke `geometry` onto `target` in `color`.
pub fn draw_border(
    target: &mut Bitmap,
    geometry: &BorderGeometry,
    style: &BorderStyle,
    color: Color,
) -> CartridgeResult<()> {
    let mut path = kurbo::BezPath::new();
    for rule in &geometry.rules {
        path.move_to(rule.p0);
        path.line_to(rule.p1);
    }
    path.extend(geometry.start.path_elements(0.1));
    path.extend(geometry.end.path_elements(0.1));

    // Stroke half-width plus one pixel of antialiasing on every side.
    let pad = style.stroke_width / 2.0 + 1.0;
    let bounds = path.bounding_box().inflate(pad, pad);
    let x0 = bounds.x0.floor().max(0.0) as u32;
    let y0 = bounds.y0.floor().max(0.0) as u32;
    let x1 = bounds.x1.ceil().max(0.0) as u32;
    let y1 = bounds.y1.ceil().max(0.0) as u32;

    let path = bezpath_to_cpu(&path);
    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
    paint_layer(target, x0, y0, w, h, |ctx| {
        ctx.set_paint(color.to_paint());
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.stroke_width));
        ctx.stroke_path(&path);
        Ok(())
    })
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/border.rs"]
mod tests;

use log::debug;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::{
    geometry::PixelPoint,
    layout::{CellRef, TriangleLayout},
};

/// Draws the whole layout, `magnify` image pixels per layout pixel with
/// `padding` image pixels of margin on every side. Cell interiors come from
/// `paint_function`; the triangle edges are stroked black on top.
pub fn print_image(
    layout: &TriangleLayout,
    magnify: usize,
    padding: usize,
    paint_function: impl Fn(CellRef) -> Paint<'static>,
) -> Pixmap {
    let (width, height) = layout.pixel_size();
    let image_width = width as usize * magnify + 2 * padding;
    let image_height = height as usize * magnify + 2 * padding;
    let mut pixmap = Pixmap::new(image_width as u32, image_height as u32).unwrap();
    debug!(
        "rendering {} cells to a {}x{} image",
        layout.row_count() * layout.col_count(),
        image_width,
        image_height
    );

    let black = {
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, u8::MAX);
        paint.anti_alias = true;
        paint
    };

    let stroke = {
        let mut stroke = Stroke::default();
        stroke.width = 2.0;
        stroke.line_cap = LineCap::Round;
        stroke.line_join = LineJoin::Round;
        stroke
    };

    let at = |v: PixelPoint| {
        (
            (v.x as usize * magnify + padding) as f32,
            (v.y as usize * magnify + padding) as f32,
        )
    };

    // Fill the interiors first so the shared edges stroke over both halves.
    for row in layout.rows() {
        for col in layout.cols() {
            let here = CellRef { row, col };
            let t = layout.vertices_of(here);
            let cell_path = {
                let mut pb = PathBuilder::new();
                let (x, y) = at(t.v1);
                pb.move_to(x, y);
                let (x, y) = at(t.v2);
                pb.line_to(x, y);
                let (x, y) = at(t.v3);
                pb.line_to(x, y);
                pb.close();
                pb.finish().unwrap()
            };
            pixmap.fill_path(
                &cell_path,
                &paint_function(here),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    let edges = {
        let mut pb = PathBuilder::new();
        for row in layout.rows() {
            for col in layout.cols() {
                let t = layout.vertices_of(CellRef { row, col });
                let (x, y) = at(t.v1);
                pb.move_to(x, y);
                let (x, y) = at(t.v2);
                pb.line_to(x, y);
                let (x, y) = at(t.v3);
                pb.line_to(x, y);
                pb.close();
            }
        }
        pb.finish().unwrap()
    };
    pixmap.stroke_path(&edges, &black, &stroke, Transform::identity(), None);

    pixmap
}

#[cfg(test)]
mod tests {
    use tiny_skia::Paint;

    use crate::layout::{LayoutOptions, TriangleLayout};

    use super::*;

    #[test]
    fn image_covers_the_layout_plus_padding() {
        let layout = TriangleLayout::new(LayoutOptions::default());
        let pixmap = print_image(&layout, 2, 5, |_| {
            let mut p = Paint::default();
            p.set_color_rgba8(u8::MAX, u8::MAX, u8::MAX, u8::MAX);
            p
        });
        // 60 layout pixels at 2x plus 5 on each side.
        assert_eq!((pixmap.width(), pixmap.height()), (130, 130));
    }
}

// Bounding-box and polygon overlays drawn on a copy of the input image

use crate::error::Result;
use crate::metrics;
use crate::vision::models::{BoundingBox, DetectedObject, DetectedPerson, Point, ReadResult};
use base64::Engine;
use image::{Rgba, RgbaImage};
use std::io::Cursor;

/// Box colors, cycled in detection order so the UI can pair list entries
/// with boxes by index.
const PALETTE: [Rgba<u8>; 7] = [
    Rgba([0xFF, 0x6B, 0x6B, 0xFF]),
    Rgba([0x4E, 0xCD, 0xC4, 0xFF]),
    Rgba([0x45, 0xB7, 0xD1, 0xFF]),
    Rgba([0x96, 0xCE, 0xB4, 0xFF]),
    Rgba([0xFF, 0xEA, 0xA7, 0xFF]),
    Rgba([0xDD, 0xA0, 0xDD, 0xFF]),
    Rgba([0x98, 0xD8, 0xC8, 0xFF]),
];

/// Outline color for OCR line polygons.
const OCR_GREEN: Rgba<u8> = Rgba([0x00, 0xFF, 0x00, 0xFF]);

const BOX_THICKNESS: u32 = 3;
const POLYGON_THICKNESS: u32 = 2;

/// Color assigned to the detection at `index`, as a `#rrggbb` string for
/// the UI legend.
pub fn palette_color(index: usize) -> String {
    let Rgba([r, g, b, _]) = PALETTE[index % PALETTE.len()];
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Draw object bounding boxes on a copy of the image, PNG out.
/// Boxes are drawn in API order with cycling palette colors.
pub fn draw_object_boxes(image_bytes: &[u8], objects: &[DetectedObject]) -> Result<Vec<u8>> {
    let mut canvas = image::load_from_memory(image_bytes)?.to_rgba8();

    for (i, object) in objects.iter().enumerate() {
        draw_rect(
            &mut canvas,
            &object.bounding_box,
            PALETTE[i % PALETTE.len()],
            BOX_THICKNESS,
        );
    }

    metrics::record_overlay_render("objects");
    encode_png(canvas)
}

/// Draw person bounding boxes on a copy of the image, PNG out.
pub fn draw_people_boxes(image_bytes: &[u8], people: &[DetectedPerson]) -> Result<Vec<u8>> {
    let mut canvas = image::load_from_memory(image_bytes)?.to_rgba8();

    for (i, person) in people.iter().enumerate() {
        draw_rect(
            &mut canvas,
            &person.bounding_box,
            PALETTE[i % PALETTE.len()],
            BOX_THICKNESS,
        );
    }

    metrics::record_overlay_render("people");
    encode_png(canvas)
}

/// Outline each OCR line polygon in green on a copy of the image, PNG out.
pub fn draw_read_polygons(image_bytes: &[u8], read: &ReadResult) -> Result<Vec<u8>> {
    let mut canvas = image::load_from_memory(image_bytes)?.to_rgba8();

    for block in &read.blocks {
        for line in &block.lines {
            draw_polygon(&mut canvas, &line.bounding_polygon, OCR_GREEN, POLYGON_THICKNESS);
        }
    }

    metrics::record_overlay_render("read");
    encode_png(canvas)
}

/// Wrap PNG bytes as a `data:` URI for the UI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Draw a hollow rectangle, clamped to the image bounds.
fn draw_rect(canvas: &mut RgbaImage, bbox: &BoundingBox, color: Rgba<u8>, thickness: u32) {
    let (x, y, w, h) = (bbox.x, bbox.y, bbox.w, bbox.h);
    if w == 0 || h == 0 {
        return;
    }

    // Coordinates come straight from the API response; clamp rather than
    // trust them to stay within the canvas.
    let right = x.saturating_add(w).min(canvas.width());
    let bottom = y.saturating_add(h).min(canvas.height());

    // Horizontal edges
    for t in 0..thickness {
        for px in x..=right {
            put_pixel_clamped(canvas, px, y.saturating_add(t), color);
            put_pixel_clamped(canvas, px, bottom.saturating_sub(t), color);
        }
    }
    // Vertical edges
    for t in 0..thickness {
        for py in y..=bottom {
            put_pixel_clamped(canvas, x.saturating_add(t), py, color);
            put_pixel_clamped(canvas, right.saturating_sub(t), py, color);
        }
    }
}

/// Draw a closed polygon outline. Polygons with fewer than three points
/// are skipped (the API occasionally returns degenerate ones).
fn draw_polygon(canvas: &mut RgbaImage, points: &[Point], color: Rgba<u8>, thickness: u32) {
    if points.len() < 3 {
        return;
    }

    for i in 0..points.len() {
        let from = points[i];
        let to = points[(i + 1) % points.len()];
        draw_line(canvas, from, to, color, thickness);
    }
}

/// Bresenham line with square brush of the given thickness.
fn draw_line(canvas: &mut RgbaImage, from: Point, to: Point, color: Rgba<u8>, thickness: u32) {
    let (mut x0, mut y0) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot_brush(canvas, x0, y0, color, thickness);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn plot_brush(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, thickness: u32) {
    for by in 0..thickness as i64 {
        for bx in 0..thickness as i64 {
            let (px, py) = (x + bx, y + by);
            if px >= 0 && py >= 0 {
                put_pixel_clamped(canvas, px as u32, py as u32, color);
            }
        }
    }
}

fn put_pixel_clamped(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
    Ok(buffer)
}

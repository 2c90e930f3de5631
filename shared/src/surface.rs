use log::trace;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::color::Rgb;
use crate::config::StrokeStyle;
use crate::error::WhiteboardError;
use crate::Point;

/// Pixel rectangle changed by a drawing call, clipped to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fixed-size raster the whiteboard paints on.
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, WhiteboardError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(WhiteboardError::InvalidDimensions { width, height })?;
        pixmap.fill(background.to_skia());
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn full_rect(&self) -> DirtyRect {
        DirtyRect {
            x: 0,
            y: 0,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width() as f32
            && point.y < self.height() as f32
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixmap.fill(color.to_skia());
    }

    /// Paints one round-capped segment. A zero-length segment paints a dot
    /// so a tap without movement still leaves a mark.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        style: StrokeStyle,
    ) -> Option<DirtyRect> {
        let mut paint = Paint::default();
        paint.set_color(style.color.to_skia());
        paint.anti_alias = true;

        if from == to {
            let path = PathBuilder::from_circle(to.x, to.y, style.width / 2.0)?;
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        } else {
            let mut builder = PathBuilder::new();
            builder.move_to(from.x, from.y);
            builder.line_to(to.x, to.y);
            let path = builder.finish()?;
            let stroke = Stroke {
                width: style.width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        trace!(
            "segment ({}, {}) -> ({}, {}) color={} width={}",
            from.x,
            from.y,
            to.x,
            to.y,
            style.color,
            style.width
        );
        self.segment_bounds(from, to, style.width)
    }

    fn segment_bounds(&self, from: Point, to: Point, width: f32) -> Option<DirtyRect> {
        // one extra pixel for anti-aliased edges
        let pad = width / 2.0 + 1.0;
        let left = (from.x.min(to.x) - pad).floor().max(0.0);
        let top = (from.y.min(to.y) - pad).floor().max(0.0);
        let right = (from.x.max(to.x) + pad).ceil().min(self.width() as f32);
        let bottom = (from.y.max(to.y) + pad).ceil().min(self.height() as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(DirtyRect {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Color of one pixel, ignoring alpha. `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb::new(color.red(), color.green(), color.blue()))
    }

    /// Raw premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight (non-premultiplied) RGBA bytes of `rect`, row-major, ready
    /// for an `ImageData` upload.
    pub fn rgba(&self, rect: DirtyRect) -> Vec<u8> {
        let mut out = Vec::with_capacity(rect.width as usize * rect.height as usize * 4);
        let stride = self.width() as usize;
        let pixels = self.pixmap.pixels();
        let right = (rect.x + rect.width).min(self.width());
        let bottom = (rect.y + rect.height).min(self.height());
        for y in rect.y..bottom {
            let row = y as usize * stride;
            for x in rect.x..right {
                let color = pixels[row + x as usize].demultiply();
                out.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
            }
        }
        out
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, WhiteboardError> {
        self.pixmap
            .encode_png()
            .map_err(|error| WhiteboardError::Encode(error.to_string()))
    }

    /// Replaces every pixel with a PNG produced by [`Surface::encode_png`].
    /// On error the surface is left as it was.
    pub fn restore_png(&mut self, bytes: &[u8]) -> Result<(), WhiteboardError> {
        let decoded =
            Pixmap::decode_png(bytes).map_err(|error| WhiteboardError::Decode(error.to_string()))?;
        if decoded.width() != self.width() || decoded.height() != self.height() {
            return Err(WhiteboardError::SnapshotSize {
                width: self.width(),
                height: self.height(),
                found_width: decoded.width(),
                found_height: decoded.height(),
            });
        }
        self.pixmap = decoded;
        Ok(())
    }
}

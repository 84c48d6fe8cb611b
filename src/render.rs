//! The compositor: turns one [`RenderRequest`] into one opaque image.
//!
//! Pipeline: generate draw commands at supersampled resolution, optionally
//! render a widened copy and blur it into a glow layer, stroke the sharp
//! layer on top, downsample with Lanczos for anti-aliasing, then flatten
//! onto the opaque background color.

use std::io::Cursor;

use kurbo::Point;

use crate::{
    blur,
    command::{DrawCommand, Stroke},
    composite, container,
    error::{GeoloomError, GeoloomResult},
    model::RenderRequest,
    patterns,
};

/// Glow stroke widening in working-canvas px per supersample unit.
const GLOW_WIDEN_PX: f64 = 8.0;

/// Gaussian sigma for the glow blur per supersample unit.
const GLOW_SIGMA_PX: f64 = 5.0;

/// Final opaque raster, straight RGBA8 with every alpha byte 255.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RenderedImage {
    /// PNG-encodes the image into an in-memory byte buffer.
    pub fn to_png_bytes(&self) -> GeoloomResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| GeoloomError::render("image buffer does not match dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| GeoloomError::render(format!("png encode failed: {e}")))?;
        Ok(buf)
    }
}

/// Renders a request to its final opaque image. Pure: no shared state, no
/// I/O; identical requests produce byte-identical images.
#[tracing::instrument(skip(request), fields(kind = request.pattern.kind(), size = request.size))]
pub fn render(request: &RenderRequest) -> GeoloomResult<RenderedImage> {
    request.validate()?;

    let factor = f64::from(request.supersample);
    // Validation bounds size * supersample, so this cannot overflow.
    let working_size = request.size * request.supersample;
    let half = f64::from(working_size) / 2.0;
    let center = Point::new(half, half);

    let stroke = Stroke::new(request.stroke_color, request.stroke_width * factor);
    let pattern = request.pattern.scaled(factor);
    let mut commands = patterns::generate(&pattern, center, stroke);
    if let Some(cfg) = &request.container {
        let mut cfg = *cfg;
        cfg.rect_length = cfg.rect_length.map(|v| v * factor);
        cfg.rect_width = cfg.rect_width.map(|v| v * factor);
        commands.push(container::generate_container(
            &cfg,
            center,
            f64::from(working_size),
            stroke.width,
        ));
    }

    // Glow layer: the same commands with widened strokes, blurred. The
    // container glows exactly like the pattern does.
    let mut working = if request.glow {
        let widen = GLOW_WIDEN_PX * factor;
        let glow_commands: Vec<DrawCommand> = commands
            .iter()
            .map(|c| c.with_widened_stroke(widen))
            .collect();
        let glow = raster_layer(&glow_commands, working_size)?;
        tracing::debug!(sigma = GLOW_SIGMA_PX * factor, "blurring glow layer");
        blur::gaussian_blur_premul(
            &glow,
            working_size,
            working_size,
            (GLOW_SIGMA_PX * factor) as f32,
        )?
    } else {
        vec![0u8; buffer_len(working_size)?]
    };

    // Sharp strokes over the glow.
    let sharp = raster_layer(&commands, working_size)?;
    composite::over_in_place(&mut working, &sharp)?;

    // Supersample -> output resolution. Lanczos over the premultiplied
    // buffer is the only smoothing applied to curve edges.
    let downsampled = if working_size == request.size {
        working
    } else {
        let img = image::RgbaImage::from_raw(working_size, working_size, working)
            .ok_or_else(|| GeoloomError::render("working buffer does not match dimensions"))?;
        image::imageops::resize(
            &img,
            request.size,
            request.size,
            image::imageops::FilterType::Lanczos3,
        )
        .into_raw()
    };

    // Flatten onto the opaque background; alpha stays 255 everywhere, so
    // premultiplied equals straight RGBA in the result.
    let bg = request.background;
    let mut out = [bg.r, bg.g, bg.b, 255].repeat(request.size as usize * request.size as usize);
    composite::over_in_place(&mut out, &downsampled)?;

    Ok(RenderedImage {
        width: request.size,
        height: request.size,
        rgba: out,
    })
}

fn raster_layer(commands: &[DrawCommand], size: u32) -> GeoloomResult<Vec<u8>> {
    let pixmap = crate::raster::rasterize(commands, size)?;
    Ok(pixmap.data_as_u8_slice().to_vec())
}

fn buffer_len(size: u32) -> GeoloomResult<usize> {
    (size as usize)
        .checked_mul(size as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GeoloomError::render("canvas buffer size overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Rgba8,
        model::{Pattern, RenderRequest},
    };

    fn small_request() -> RenderRequest {
        RenderRequest {
            pattern: Pattern::SeedOfLife { radius: 20.0 },
            stroke_color: Rgba8::opaque(0, 250, 255),
            stroke_width: 2.0,
            size: 96,
            background: Rgba8::opaque(14, 17, 23),
            glow: false,
            container: None,
            supersample: 2,
        }
    }

    #[test]
    fn output_is_requested_size_and_opaque() {
        let img = render(&small_request()).unwrap();
        assert_eq!((img.width, img.height), (96, 96));
        assert_eq!(img.rgba.len(), 96 * 96 * 4);
        assert!(img.rgba.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn corners_keep_the_background_color() {
        let img = render(&small_request()).unwrap();
        assert_eq!(&img.rgba[0..4], &[14, 17, 23, 255]);
        let last = img.rgba.len() - 4;
        assert_eq!(&img.rgba[last..], &[14, 17, 23, 255]);
    }

    #[test]
    fn invalid_request_fails_before_drawing() {
        let mut req = small_request();
        req.stroke_width = 0.5;
        assert!(matches!(
            render(&req),
            Err(GeoloomError::Validation(_))
        ));
    }

    #[test]
    fn png_bytes_decode_back_to_same_dimensions() {
        let img = render(&small_request()).unwrap();
        let png = img.to_png_bytes().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (96, 96));
    }
}

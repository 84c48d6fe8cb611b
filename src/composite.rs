//! Premultiplied source-over compositing for the layer stack (glow under
//! sharp strokes, downsampled art over the opaque background).

use crate::error::{GeoloomError, GeoloomResult};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u32 - u32::from(sa);
    let mut out = [0u8; 4];
    for c in 0..4 {
        let d = (u32::from(dst[c]) * inv + 127) / 255;
        out[c] = (u32::from(src[c]) + d).min(255) as u8;
    }
    out
}

/// Composites `src` over `dst` pixel by pixel. Both buffers must be the
/// same length and a whole number of RGBA8 pixels.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> GeoloomResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(GeoloomError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

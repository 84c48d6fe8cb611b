//! Separable Gaussian blur over premultiplied RGBA8 buffers, used to turn
//! the widened glow strokes into a soft halo.

use crate::error::{GeoloomError, GeoloomResult};

/// Blurs `src` (premultiplied RGBA8, `width * height * 4` bytes) with a
/// Gaussian of standard deviation `sigma`. The kernel extends to three
/// sigma; edges clamp.
pub fn gaussian_blur_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> GeoloomResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GeoloomError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(GeoloomError::render(
            "gaussian_blur_premul expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(GeoloomError::validation("blur sigma must be > 0"));
    }

    let kernel = gaussian_kernel(sigma);
    if kernel.len() == 1 {
        return Ok(src.to_vec());
    }

    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    convolve_rows(src, &mut tmp, width as usize, height as usize, &kernel);
    convolve_cols(&tmp, &mut out, width as usize, height as usize, &kernel);
    Ok(out)
}

/// Normalized symmetric kernel of length `2 * ceil(3 sigma) + 1`.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let half = (3.0 * f64::from(sigma)).ceil() as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights: Vec<f64> = (-half..=half)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

fn convolve_rows(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &[f32]) {
    let half = (kernel.len() / 2) as isize;
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1) as usize;
                let idx = (row + sx) * 4;
                for c in 0..4 {
                    acc[c] += w * f32::from(src[idx + c]);
                }
            }
            let idx = (row + x) * 4;
            for c in 0..4 {
                dst[idx + c] = round_u8(acc[c]);
            }
        }
    }
}

fn convolve_cols(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &[f32]) {
    let half = (kernel.len() / 2) as isize;
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, &w) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                let idx = (sy * width + x) * 4;
                for c in 0..4 {
                    acc[c] += w * f32::from(src[idx + c]);
                }
            }
            let idx = (y * width + x) * 4;
            for c in 0..4 {
                dst[idx + c] = round_u8(acc[c]);
            }
        }
    }
}

fn round_u8(v: f32) -> u8 {
    (v + 0.5).clamp(0.0, 255.0) as u8
}

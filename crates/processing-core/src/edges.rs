//! Mask cleanup and edge extraction.

use std::collections::VecDeque;

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use imageproc::morphology::erode;

/// Edge pixel value in the output edge map.
pub const EDGE: u8 = 255;

/// Erode with a 5x5 square structuring element, `iterations` times.
pub fn erode_mask(mask: &GrayImage, iterations: u32) -> GrayImage {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out, Norm::LInf, 2);
    }
    out
}

/// Canny-style edge map of a binary mask.
///
/// Sobel gradients (L1 magnitude) are thinned by non-maximum suppression
/// along the quantized gradient direction, then linked by hysteresis:
/// pixels at or above `high` seed edges, which grow through 8-connected
/// pixels at or above `low`.
///
/// `imageproc::edges::canny` is not used because it Gaussian-blurs first,
/// which shifts edges off the binary mask boundaries and breaks symmetric
/// layouts.
pub fn detect_edges(mask: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (width, height) = mask.dimensions();
    let gx = horizontal_sobel(mask);
    let gy = vertical_sobel(mask);

    let magnitude: Vec<f32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(x, y)| f32::from(x.0[0]).abs() + f32::from(y.0[0]).abs())
        .collect();
    let at = |x: i64, y: i64| -> f32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0.0
        } else {
            magnitude[(y as usize) * width as usize + x as usize]
        }
    };

    let mut thinned = vec![0.0f32; magnitude.len()];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let m = magnitude[idx];
            if m == 0.0 {
                continue;
            }

            let dx = f32::from(gx.get_pixel(x, y).0[0]);
            let dy = f32::from(gy.get_pixel(x, y).0[0]);
            let (ox, oy) = neighbor_offset(dy.atan2(dx).to_degrees());

            let (x, y) = (x as i64, y as i64);
            let a = at(x + ox, y + oy);
            let b = at(x - ox, y - oy);
            if m >= a && m >= b {
                thinned[idx] = m;
            }
        }
    }

    hysteresis(&thinned, width, height, low, high)
}

/// Offset to one of the two neighbors along the gradient direction; the
/// other is its negation. Image y grows downwards.
fn neighbor_offset(angle_deg: f32) -> (i64, i64) {
    let mut angle = angle_deg % 180.0;
    if angle < 0.0 {
        angle += 180.0;
    }
    if !(22.5..157.5).contains(&angle) {
        (1, 0)
    } else if angle < 67.5 {
        (1, 1)
    } else if angle < 112.5 {
        (0, 1)
    } else {
        (-1, 1)
    }
}

fn hysteresis(thinned: &[f32], width: u32, height: u32, low: f32, high: f32) -> GrayImage {
    let mut out = GrayImage::new(width, height);
    let mut queue = VecDeque::new();

    for y in 0..height {
        for x in 0..width {
            let m = thinned[(y * width + x) as usize];
            if m >= high && out.get_pixel(x, y).0[0] == 0 {
                out.put_pixel(x, y, Luma([EDGE]));
                queue.push_back((x, y));

                while let Some((cx, cy)) = queue.pop_front() {
                    for ny in cy.saturating_sub(1)..=(cy + 1).min(height - 1) {
                        for nx in cx.saturating_sub(1)..=(cx + 1).min(width - 1) {
                            let n = thinned[(ny * width + nx) as usize];
                            if n >= low && n > 0.0 && out.get_pixel(nx, ny).0[0] == 0 {
                                out.put_pixel(nx, ny, Luma([EDGE]));
                                queue.push_back((nx, ny));
                            }
                        }
                    }
                }
            }
        }
    }

    out
}

//! HSV conversion and separator masking.
//!
//! HSV uses the 8-bit convention common to vision libraries: hue in
//! `0..180` (degrees halved), saturation and value in `0..=255`.

use callmap_model::Bitmap;
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Inclusive lower HSV bound of a separator pixel.
pub const SEPARATOR_LOW: [u8; 3] = [0, 0, 0];
/// Inclusive upper HSV bound of a separator pixel.
pub const SEPARATOR_HIGH: [u8; 3] = [1, 1, 1];

/// Mask value marking a separator pixel.
pub const MASK_ON: u8 = 255;

pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    [
        ((h / 2.0).round() as u16 % 180) as u8,
        s.round() as u8,
        v as u8,
    ]
}

fn in_range(hsv: [u8; 3], low: [u8; 3], high: [u8; 3]) -> bool {
    (0..3).all(|c| low[c] <= hsv[c] && hsv[c] <= high[c])
}

pub fn is_separator(pixel: Rgb<u8>) -> bool {
    in_range(rgb_to_hsv(pixel), SEPARATOR_LOW, SEPARATOR_HIGH)
}

/// Binary mask: [`MASK_ON`] where the bitmap is separator-colored, 0 elsewhere.
pub fn separator_mask(bitmap: &Bitmap) -> GrayImage {
    let source = bitmap.as_image();
    GrayImage::from_fn(source.width(), source.height(), |x, y| {
        if is_separator(*source.get_pixel(x, y)) {
            Luma([MASK_ON])
        } else {
            Luma([0])
        }
    })
}

/// Copy of the bitmap with masked pixels painted red.
pub fn highlight_mask(bitmap: &Bitmap, mask: &GrayImage) -> RgbImage {
    let mut out = bitmap.as_image().clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] != 0 {
            *pixel = Rgb([255, 0, 0]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_convert_to_half_degree_hue() {
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 0])), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 255, 0])), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 255])), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([255, 255, 255])), [0, 0, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 0])), [0, 0, 0]);
    }

    #[test]
    fn only_black_and_darkest_gray_are_separators() {
        assert!(is_separator(Rgb([0, 0, 0])));
        assert!(is_separator(Rgb([1, 1, 1])));
        assert!(!is_separator(Rgb([2, 2, 2])));
        // Any tint saturates fully at this brightness.
        assert!(!is_separator(Rgb([1, 0, 0])));
        assert!(!is_separator(Rgb([30, 30, 30])));
    }

    #[test]
    fn mask_and_highlight_follow_separator_pixels() {
        let bitmap = Bitmap::new(RgbImage::from_fn(4, 1, |x, _| {
            if x % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([200, 180, 40])
            }
        }));

        let mask = separator_mask(&bitmap);
        let values: Vec<u8> = mask.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![255, 0, 255, 0]);

        let highlighted = highlight_mask(&bitmap, &mask);
        assert_eq!(highlighted.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(highlighted.get_pixel(1, 0), &Rgb([200, 180, 40]));
    }
}

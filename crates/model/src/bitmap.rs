//! Immutable RGB bitmaps passed between pipeline stages.

use std::path::Path;

use callmap_common::error::{CallmapError, CallmapResult};
use image::{imageops, DynamicImage, RgbImage, RgbaImage};

use crate::geometry::ScreenRect;

/// An RGB pixel grid. Never mutated after construction; stages hand it on
/// by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbImage,
}

impl Bitmap {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Drop the alpha channel of a captured frame.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self::new(DynamicImage::ImageRgba8(image).to_rgb8())
    }

    /// Load an image file (PNG, JPEG, ...) as a bitmap.
    pub fn open(path: &Path) -> CallmapResult<Self> {
        if !path.exists() {
            return Err(CallmapError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let image = image::open(path).map_err(|e| {
            CallmapError::processing(format!("Failed to decode {}: {e}", path.display()))
        })?;
        Ok(Self::new(image.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// The full extent of the bitmap at the origin.
    pub fn bounds(&self) -> Option<ScreenRect> {
        ScreenRect::new(0, 0, self.width(), self.height())
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Copy out the pixels under `rect`, clipped to the bitmap.
    /// Returns `None` when the clipped region is empty.
    pub fn crop(&self, rect: &ScreenRect) -> Option<Bitmap> {
        let region = self.bounds()?.intersect(rect)?;
        let view = imageops::crop_imm(
            &self.image,
            region.x as u32,
            region.y as u32,
            region.width,
            region.height,
        );
        Some(Bitmap::new(view.to_image()))
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: &Path) -> CallmapResult<()> {
        self.image
            .save(path)
            .map_err(|e| CallmapError::persistence(path, e.to_string()))
    }
}

impl From<RgbImage> for Bitmap {
    fn from(image: RgbImage) -> Self {
        Self::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> Bitmap {
        Bitmap::new(RgbImage::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, 0])
        }))
    }

    #[test]
    fn crop_extracts_region_pixels() {
        let bitmap = gradient(100, 50);
        let cropped = bitmap
            .crop(&ScreenRect::new(10, 20, 30, 5).unwrap())
            .unwrap();
        assert_eq!((cropped.width(), cropped.height()), (30, 5));
        assert_eq!(cropped.as_image().get_pixel(0, 0), &Rgb([10, 20, 0]));
        assert_eq!(cropped.as_image().get_pixel(29, 4), &Rgb([39, 24, 0]));
    }

    #[test]
    fn crop_clips_to_bounds() {
        let bitmap = gradient(100, 50);
        let cropped = bitmap
            .crop(&ScreenRect::new(90, -10, 30, 30).unwrap())
            .unwrap();
        assert_eq!((cropped.width(), cropped.height()), (10, 20));
        assert!(bitmap
            .crop(&ScreenRect::new(200, 0, 5, 5).unwrap())
            .is_none());
    }

    #[test]
    fn rgba_frames_lose_alpha() {
        let rgba = RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 128]));
        let bitmap = Bitmap::from_rgba(rgba);
        assert_eq!(bitmap.as_image().get_pixel(3, 3), &Rgb([1, 2, 3]));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let path = std::env::temp_dir().join("callmap_no_such_screenshot.png");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            Bitmap::open(&path),
            Err(CallmapError::FileNotFound { .. })
        ));
    }

    #[test]
    fn save_and_open_png() {
        let dir = std::env::temp_dir().join("callmap_test_bitmap_png");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("window.png");
        let bitmap = gradient(16, 8);
        bitmap.save(&path).unwrap();
        assert_eq!(Bitmap::open(&path).unwrap(), bitmap);

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Asset loading: PNG images decoded into collision masks
//!
//! The classic circuit ships as four images. Each is scaled the way the
//! game draws it and thresholded on alpha, so collisions follow exactly
//! the pixels on screen.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;

use crate::sim::{Mask, Track};

/// Draw scale of the track border image
pub const BORDER_SCALE: f32 = 0.9;
/// Draw scale of the player car image
pub const PLAYER_SCALE: f32 = 0.12;
/// Draw scale of the computer car image
pub const COMPUTER_SCALE: f32 = 0.06;

pub const BORDER_FILE: &str = "track-border.png";
pub const FINISH_FILE: &str = "finish.png";
pub const PLAYER_FILE: &str = "player.png";
pub const COMPUTER_FILE: &str = "computer.png";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Image {path} scales to nothing at {scale}")]
    Empty { path: PathBuf, scale: f32 },
    #[error("Pixel buffer of {len} bytes does not fit {width}x{height}")]
    BadBuffer { width: u32, height: u32, len: usize },
}

/// Size of an image after scaling, each side rounded to whole pixels
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    (
        (width as f32 * scale).round() as u32,
        (height as f32 * scale).round() as u32,
    )
}

/// Scale an RGBA image by `scale` with nearest-neighbour sampling
pub fn scale_image(image: &RgbaImage, scale: f32) -> RgbaImage {
    if scale == 1.0 {
        return image.clone();
    }
    let (width, height) = scaled_size(image.width(), image.height(), scale);
    imageops::resize(image, width, height, FilterType::Nearest)
}

/// Opaque pixels (alpha above the threshold) of `image` as a mask
pub fn image_mask(image: &RgbaImage) -> Result<Mask, AssetError> {
    let (width, height) = image.dimensions();
    let raw = image.as_raw();
    Mask::from_rgba(width, height, raw).ok_or(AssetError::BadBuffer {
        width,
        height,
        len: raw.len(),
    })
}

/// Decode the PNG at `path`, scale it and build its mask
pub fn load_mask(path: &Path, scale: f32) -> Result<Mask, AssetError> {
    let image = image::open(path)
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = scaled_size(image.width(), image.height(), scale);
    if width == 0 || height == 0 {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
            scale,
        });
    }

    let scaled = scale_image(&image, scale);
    let mask = image_mask(&scaled)?;
    log::info!(
        "Loaded {} ({}x{}, {} solid pixels)",
        path.display(),
        mask.width(),
        mask.height(),
        mask.count()
    );
    Ok(mask)
}

/// Load the classic circuit from the images in `dir`
pub fn load_classic(dir: &Path) -> Result<Track, AssetError> {
    let border = load_mask(&dir.join(BORDER_FILE), BORDER_SCALE)?;
    let finish = load_mask(&dir.join(FINISH_FILE), 1.0)?;
    let player = load_mask(&dir.join(PLAYER_FILE), PLAYER_SCALE)?;
    let computer = load_mask(&dir.join(COMPUTER_FILE), COMPUTER_SCALE)?;
    Ok(Track::classic(border, finish, player, computer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("finish-line-assets-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Transparent image with an opaque block in the top-left quarter
    fn quarter_block(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if x < width / 2 && y < height / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_alpha_threshold() {
        let image = RgbaImage::from_fn(3, 1, |x, _| Rgba([0, 0, 0, [127, 128, 255][x as usize]]));
        let mask = image_mask(&image).unwrap();
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(mask.get(2, 0));
    }

    #[test]
    fn test_scaled_size_rounds() {
        assert_eq!(scaled_size(810, 810, 0.9), (729, 729));
        assert_eq!(scaled_size(100, 210, 0.06), (6, 13));
        assert_eq!(scaled_size(4, 4, 0.06), (0, 0));
    }

    #[test]
    fn test_scale_rounds_sides() {
        let image = quarter_block(100, 50);
        let scaled = scale_image(&image, 0.12);
        assert_eq!(scaled.dimensions(), (12, 6));
        let mask = image_mask(&scaled).unwrap();
        assert!(mask.get(0, 0));
        assert!(!mask.get(11, 5));
    }

    #[test]
    fn test_load_mask_from_png() {
        let dir = temp_dir("load");
        let path = dir.join("block.png");
        quarter_block(20, 20).save(&path).unwrap();

        let mask = load_mask(&path, 0.5).unwrap();
        assert_eq!((mask.width(), mask.height()), (10, 10));
        assert!(mask.get(0, 0));
        assert!(!mask.get(9, 9));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_mask(Path::new("/definitely/not/here.png"), 1.0).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn test_scaled_to_nothing() {
        let dir = temp_dir("tiny");
        let path = dir.join("tiny.png");
        quarter_block(4, 4).save(&path).unwrap();
        let err = load_mask(&path, 0.06).unwrap_err();
        assert!(matches!(err, AssetError::Empty { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_classic() {
        let dir = temp_dir("classic");
        RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 0])).save(dir.join(BORDER_FILE)).unwrap();
        quarter_block(10, 4).save(dir.join(FINISH_FILE)).unwrap();
        quarter_block(100, 200).save(dir.join(PLAYER_FILE)).unwrap();
        quarter_block(100, 200).save(dir.join(COMPUTER_FILE)).unwrap();

        let track = load_classic(&dir).unwrap();
        assert_eq!(track.name, "classic");
        assert_eq!((track.size.x, track.size.y), (90, 90));
        assert_eq!(track.border.count(), 0);
        assert_eq!((track.player_sprite.width(), track.player_sprite.height()), (12, 24));
        assert_eq!((track.computer_sprite.width(), track.computer_sprite.height()), (6, 12));
        let _ = std::fs::remove_dir_all(&dir);
    }
}

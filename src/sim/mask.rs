//! Binary occupancy masks for pixel-exact collision
//!
//! A mask is a bit-per-pixel grid. Track borders, the finish line and car
//! sprites are all masks; collision is an AND of two masks at an offset.

use glam::IVec2;

use crate::consts::MASK_ALPHA_THRESHOLD;

const WORD_BITS: usize = 64;

/// Bit-packed occupancy grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// u64 words per row
    stride: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Empty mask of the given size
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(WORD_BITS);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build a mask from tightly packed RGBA8 pixels.
    ///
    /// A pixel is solid when its alpha is above the threshold. Returns `None`
    /// when the buffer length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self::from_fn(width, height, |x, y| {
            let idx = (y as usize * width as usize + x as usize) * 4 + 3;
            rgba[idx] > MASK_ALPHA_THRESHOLD
        }))
    }

    /// Fully solid rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel is solid (out-of-bounds pixels are empty)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        let word = self.bits[y * self.stride + x / WORD_BITS];
        word & (1 << (x % WORD_BITS)) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let word = &mut self.bits[y * self.stride + x / WORD_BITS];
        let bit = 1 << (x % WORD_BITS);
        if solid {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First pixel where `self` and `other` are both solid.
    ///
    /// `offset` is where `other`'s top-left corner sits in `self`'s space. The
    /// returned point is in `self`'s coordinates; rows are scanned top to
    /// bottom, then columns left to right.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }

    /// Size of the box that holds this mask rotated by `angle_deg`
    pub fn rotated_size(&self, angle_deg: f32) -> (u32, u32) {
        rotated_extent(self.width, self.height, angle_deg)
    }

    /// Rotate counter-clockwise by `angle_deg` about the centre.
    ///
    /// The result grows to the bounding box of the rotated rectangle, with the
    /// rotated content centred in it. Sampling is nearest-neighbour.
    pub fn rotated(&self, angle_deg: f32) -> Mask {
        let angle = angle_deg.rem_euclid(360.0);
        if angle == 0.0 {
            return self.clone();
        }

        let (out_w, out_h) = rotated_extent(self.width, self.height, angle);
        let (sin, cos) = (angle as f64).to_radians().sin_cos();
        let (src_cx, src_cy) = (self.width as f64 / 2.0, self.height as f64 / 2.0);
        let (dst_cx, dst_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

        Mask::from_fn(out_w, out_h, |x, y| {
            // Inverse rotation from destination pixel centre back to source
            let rx = x as f64 + 0.5 - dst_cx;
            let ry = y as f64 + 0.5 - dst_cy;
            let sx = rx * cos - ry * sin + src_cx;
            let sy = rx * sin + ry * cos + src_cy;
            self.get(sx.floor() as i32, sy.floor() as i32)
        })
    }
}

/// Bounding box of a `width` x `height` rectangle rotated by `angle_deg`
pub fn rotated_extent(width: u32, height: u32, angle_deg: f32) -> (u32, u32) {
    let (sin, cos) = (angle_deg.rem_euclid(360.0) as f64).to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let (w, h) = (width as f64, height as f64);
    // Shave rounding noise so 90-degree turns don't grow by a pixel
    let out_w = (w * cos + h * sin - 1e-6).ceil().max(1.0);
    let out_h = (w * sin + h * cos - 1e-6).ceil().max(1.0);
    (out_w as u32, out_h as u32)
}

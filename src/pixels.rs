//! # 像素格式转换模块
//!
//! 在 `image` crate 的 `RgbImage` 与核心算法使用的打包 RGB 缓冲区
//! (`0x00RRGGBB`，行优先) 之间相互转换。

use crate::error::{Result, WatermarkError};
use image::{Rgb, RgbImage};

/// 将图像按行优先顺序打包为 `0x00RRGGBB` 形式的像素缓冲区。
pub fn to_packed_rgb(image: &RgbImage) -> Vec<u32> {
    image
        .pixels()
        .map(|&Rgb([r, g, b])| u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
        .collect()
}

/// 由打包像素缓冲区重建图像。高于第 23 位的数据被忽略。
///
/// # Errors
///
/// 缓冲区长度与 `width * height` 不一致时返回 [`WatermarkError::LengthMismatch`]。
pub fn from_packed_rgb(width: u32, height: u32, pixels: &[u32]) -> Result<RgbImage> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(WatermarkError::LengthMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let raw: Vec<u8> = pixels
        .iter()
        .flat_map(|&p| [(p >> 16) as u8, (p >> 8) as u8, p as u8])
        .collect();

    RgbImage::from_raw(width, height, raw).ok_or(WatermarkError::LengthMismatch {
        expected,
        actual: pixels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_rgb_order() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0x12, 0x34, 0x56]));
        image.put_pixel(1, 0, Rgb([0xFF, 0x00, 0x01]));
        assert_eq!(to_packed_rgb(&image), vec![0x12_34_56, 0xFF_00_01]);
    }

    #[test]
    fn unpacking_drops_high_bits() {
        let image = from_packed_rgb(1, 1, &[0xAB_12_34_56]).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgb([0x12, 0x34, 0x56]));
    }

    #[test]
    fn unpacking_checks_length() {
        assert!(from_packed_rgb(2, 2, &[0; 3]).is_err());
    }
}

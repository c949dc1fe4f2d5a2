//! # 水印位清零模块
//!
//! 将掩码应用到像素缓冲区，清除所有保留给水印数据的位，
//! 并定义由调用方提供的水印载荷嵌入接口。

use crate::error::{Result, WatermarkError};
use crate::mask::{MaskConfig, pixel_count};
use tracing::debug;

/// 将准备好的像素缓冲区与水印载荷合成为最终图像的外部能力。
///
/// 本库不提供具体实现 (签名、校验码等均由调用方负责)。
pub trait PayloadEmbedder {
    /// 将 `payload` 写入 `prepared` 中被 `mask` 保留的位。
    ///
    /// 调用时 `prepared` 中所有保留位均已为 0，且 `prepared.len() == mask.len()`。
    fn embed(&self, prepared: &mut [u32], mask: &[u32], payload: &[u8]) -> Result<()>;
}

/// 使用默认网格配置清除像素缓冲区中的水印保留位。
///
/// 对每个下标 `k`，`pixels[k]` 被替换为 `pixels[k] & mask[k]`。
///
/// # Errors
///
/// * 尺寸非法时返回 [`WatermarkError::InvalidDimension`]。
/// * `pixels.len() != width * height` 时返回 [`WatermarkError::LengthMismatch`]，
///   此时缓冲区不会被修改。
pub fn clear_watermark_bits(pixels: &mut [u32], width: i64, height: i64) -> Result<()> {
    MaskConfig::default().clear_bits(pixels, width, height)
}

impl MaskConfig {
    /// 使用当前网格配置清除水印保留位。
    pub fn clear_bits(&self, pixels: &mut [u32], width: i64, height: i64) -> Result<()> {
        self.clear_bits_with_mask(pixels, width, height).map(|_| ())
    }

    fn clear_bits_with_mask(&self, pixels: &mut [u32], width: i64, height: i64) -> Result<Vec<u32>> {
        check_length(pixels.len(), width, height)?;
        let mask = self.generate(width, height)?;

        pixels
            .iter_mut()
            .zip(&mask)
            .for_each(|(pixel, &bits)| *pixel &= bits);

        debug!(pixels = pixels.len(), "cleared watermark bits");
        Ok(mask)
    }
}

/// 清除水印保留位后，将缓冲区、掩码与载荷交给 `embedder` 完成嵌入。
///
/// # Errors
///
/// 除 [`clear_watermark_bits`] 的错误外，还会原样返回 `embedder` 报告的错误。
pub fn prepare_and_embed<E: PayloadEmbedder + ?Sized>(
    pixels: &mut [u32],
    width: i64,
    height: i64,
    config: &MaskConfig,
    embedder: &E,
    payload: &[u8],
) -> Result<()> {
    let mask = config.clear_bits_with_mask(pixels, width, height)?;
    embedder.embed(pixels, &mask, payload)
}

fn check_length(actual: usize, width: i64, height: i64) -> Result<()> {
    let expected = pixel_count(width, height)?;
    if actual != expected {
        return Err(WatermarkError::LengthMismatch { expected, actual });
    }
    Ok(())
}

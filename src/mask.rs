//! # 水印掩码生成模块
//!
//! 仅根据图像尺寸生成逐像素的 AND 掩码，标记哪些颜色位保留给水印数据。
//! 掩码由两层网格组成：小网格点保留每个通道的最低有效位，
//! 大网格点保留每个通道从低位数第 4 位。

use crate::constants::{
    BITS_PER_POSITION, FULL_MASK, LARGE_GRID_MASK, LARGE_GRID_SPACING, SMALL_GRID_MASK,
    SMALL_GRID_SPACING,
};
use crate::error::{Result, WatermarkError};
use tracing::debug;

/// 两层水印网格的间距配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskConfig {
    pub small_spacing: u32,
    pub large_spacing: u32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            small_spacing: SMALL_GRID_SPACING,
            large_spacing: LARGE_GRID_SPACING,
        }
    }
}

/// 给定尺寸下各层网格实际占用的位置数量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCapacity {
    pub small_positions: usize,
    pub large_positions: usize,
}

impl GridCapacity {
    /// 可用于嵌入水印的总位数 (每个位置每个通道 1 位)。
    pub fn total_bits(&self) -> usize {
        (self.small_positions + self.large_positions) * BITS_PER_POSITION
    }
}

impl MaskConfig {
    pub fn new(small_spacing: u32, large_spacing: u32) -> Result<Self> {
        let config = Self {
            small_spacing,
            large_spacing,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        [self.small_spacing, self.large_spacing]
            .into_iter()
            .find(|&spacing| spacing == 0)
            .map_or(Ok(()), |spacing| {
                Err(WatermarkError::InvalidGridSpacing(spacing))
            })
    }

    /// 返回位置 `(i, j)` 处的掩码值。
    ///
    /// 小网格优先：同时落在两层网格上的位置只应用小网格掩码。
    fn mask_at(&self, i: usize, j: usize) -> u32 {
        let small = self.small_spacing as usize;
        let large = self.large_spacing as usize;

        if i % small == 0 && j % small == 0 {
            FULL_MASK & SMALL_GRID_MASK
        } else if i % large == 0 && j % large == 0 {
            FULL_MASK & LARGE_GRID_MASK
        } else {
            FULL_MASK
        }
    }

    /// 按行优先顺序生成 `width * height` 长度的掩码。
    ///
    /// 外层循环遍历行 (`height`)，内层循环遍历列 (`width`)，
    /// 因此位置 `(i, j)` 对应下标 `j * width + i`。
    ///
    /// # Errors
    ///
    /// * 宽或高为负数，或像素总数溢出时返回 [`WatermarkError::InvalidDimension`]。
    /// * 网格间距为 0 时返回 [`WatermarkError::InvalidGridSpacing`]。
    pub fn generate(&self, width: i64, height: i64) -> Result<Vec<u32>> {
        self.validate()?;
        let count = pixel_count(width, height)?;
        let mut mask = vec![FULL_MASK; count];
        if count == 0 {
            return Ok(mask);
        }

        let width = width as usize;
        for (j, row) in mask.chunks_exact_mut(width).enumerate() {
            for (i, value) in row.iter_mut().enumerate() {
                *value = self.mask_at(i, j);
            }
        }

        debug!(
            width,
            height,
            small_spacing = self.small_spacing,
            large_spacing = self.large_spacing,
            "generated watermark mask"
        );
        Ok(mask)
    }

    /// 统计给定尺寸下落在小网格与大网格上的位置数量。
    pub fn reserved_positions(&self, width: i64, height: i64) -> Result<GridCapacity> {
        self.validate()?;
        let count = pixel_count(width, height)?;
        if count == 0 {
            return Ok(GridCapacity::default());
        }

        let (width, height) = (width as usize, height as usize);
        let capacity = (0..height)
            .flat_map(|j| (0..width).map(move |i| (i, j)))
            .map(|(i, j)| self.mask_at(i, j))
            .fold(GridCapacity::default(), |mut acc, value| {
                match value {
                    SMALL_GRID_MASK => acc.small_positions += 1,
                    LARGE_GRID_MASK => acc.large_positions += 1,
                    _ => {}
                }
                acc
            });
        Ok(capacity)
    }
}

/// 使用默认网格间距 (32 / 128) 生成水印掩码。
///
/// 参见 [`MaskConfig::generate`]。
pub fn generate_mask(width: i64, height: i64) -> Result<Vec<u32>> {
    MaskConfig::default().generate(width, height)
}

/// 校验尺寸并返回像素总数。
pub(crate) fn pixel_count(width: i64, height: i64) -> Result<usize> {
    let invalid = || WatermarkError::InvalidDimension { width, height };

    let w = usize::try_from(width).map_err(|_| invalid())?;
    let h = usize::try_from(height).map_err(|_| invalid())?;
    w.checked_mul(h).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_grid_takes_precedence_over_large_grid() {
        let config = MaskConfig::default();
        assert_eq!(config.mask_at(0, 0), SMALL_GRID_MASK);
        assert_eq!(config.mask_at(128, 128), SMALL_GRID_MASK);
        assert_eq!(config.mask_at(16, 0), FULL_MASK);
    }

    #[test]
    fn non_nested_grids_use_else_branch() {
        let config = MaskConfig::new(3, 5).unwrap();
        assert_eq!(config.mask_at(5, 5), LARGE_GRID_MASK);
        assert_eq!(config.mask_at(15, 15), SMALL_GRID_MASK);
        assert_eq!(config.mask_at(5, 3), FULL_MASK);
    }

    #[test]
    fn zero_spacing_is_rejected() {
        assert_eq!(
            MaskConfig::new(0, 128),
            Err(WatermarkError::InvalidGridSpacing(0))
        );
        let config = MaskConfig {
            small_spacing: 32,
            large_spacing: 0,
        };
        assert!(config.generate(4, 4).is_err());
    }

    #[test]
    fn pixel_count_rejects_negative_and_overflow() {
        assert_eq!(pixel_count(3, 4), Ok(12));
        assert!(pixel_count(-1, 4).is_err());
        assert!(pixel_count(4, -1).is_err());
        assert!(pixel_count(i64::MAX, i64::MAX).is_err());
    }

    #[test]
    fn capacity_counts_both_grids() {
        let capacity = MaskConfig::new(3, 5).unwrap().reserved_positions(10, 10).unwrap();
        // 小网格点：i, j ∈ {0, 3, 6, 9}
        assert_eq!(capacity.small_positions, 16);
        // 大网格点：i, j ∈ {0, 5}，去掉 (0, 0)
        assert_eq!(capacity.large_positions, 3);
        assert_eq!(capacity.total_bits(), 19 * 3);
    }
}

//! # 通道失真度量模块
//!
//! 按 RGB 三个通道分别计算原图与加水印后图像之间的信噪比 (PSNR 形式，单位 dB)。

use crate::constants::MAX_INTENSITY;
use crate::error::{Result, WatermarkError};
use std::fmt;
use tracing::debug;

/// 红、绿、蓝通道在打包像素中的位移。
const CHANNEL_SHIFTS: [u32; 3] = [16, 8, 0];

/// 单像素单通道差值的计算方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifferenceMode {
    /// 先将两个通道值各自截取为 8 位，再相减。
    #[default]
    Masked,
    /// 复现旧实现表达式 `(a >> s) & 0xFF - (b >> s) & 0xFF` 在减法优先于按位与时的结果，
    /// 即 `a & (0xFF - b) & 0xFF`。
    Legacy,
}

impl DifferenceMode {
    fn difference(self, original: u32, modified: u32, shift: u32) -> i64 {
        let a = i64::from(original >> shift);
        let b = i64::from(modified >> shift);
        match self {
            Self::Masked => (a & 0xFF) - (b & 0xFF),
            Self::Legacy => a & (0xFF - b) & 0xFF,
        }
    }
}

/// 三个通道各自的 SNR (dB)。两通道完全一致时为正无穷。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSnr {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ChannelSnr {
    pub fn as_array(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn is_lossless(&self) -> bool {
        self.as_array().iter().all(|v| v.is_infinite())
    }
}

impl fmt::Display for ChannelSnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R: {:.2} dB, G: {:.2} dB, B: {:.2} dB",
            self.red, self.green, self.blue
        )
    }
}

/// 使用 [`DifferenceMode::Masked`] 计算逐通道 SNR。
///
/// # Errors
///
/// 两个缓冲区长度不同时返回 [`WatermarkError::LengthMismatch`]。
pub fn compute_snr(original: &[u32], modified: &[u32]) -> Result<ChannelSnr> {
    compute_snr_with(original, modified, DifferenceMode::Masked)
}

/// 按指定的差值方式计算逐通道 SNR。
///
/// 对每个通道求均方误差 `MSE`，结果为 `10 * log10(255² / MSE)`；
/// `MSE == 0` (包括空缓冲区) 时返回 `f64::INFINITY`。
pub fn compute_snr_with(
    original: &[u32],
    modified: &[u32],
    mode: DifferenceMode,
) -> Result<ChannelSnr> {
    if original.len() != modified.len() {
        return Err(WatermarkError::LengthMismatch {
            expected: original.len(),
            actual: modified.len(),
        });
    }

    let squared_sums = original.iter().zip(modified).fold(
        [0u64; 3],
        |mut sums, (&a, &b)| {
            for (sum, shift) in sums.iter_mut().zip(CHANNEL_SHIFTS) {
                let value = mode.difference(a, b, shift);
                *sum += (value * value) as u64;
            }
            sums
        },
    );

    let [red, green, blue] = squared_sums.map(|sum| to_decibels(sum, original.len()));
    let snr = ChannelSnr { red, green, blue };
    debug!(pixels = original.len(), ?mode, %snr, "computed channel SNR");
    Ok(snr)
}

fn to_decibels(squared_sum: u64, count: usize) -> f64 {
    if squared_sum == 0 || count == 0 {
        return f64::INFINITY;
    }
    let mse = squared_sum as f64 / count as f64;
    10.0 * (MAX_INTENSITY * MAX_INTENSITY / mse).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_difference_ignores_high_bits() {
        let mode = DifferenceMode::Masked;
        assert_eq!(mode.difference(0xFF_00_00_64, 0x00_00_00_00, 0), 100);
        assert_eq!(mode.difference(0x00_00_00_00, 0x00_00_00_64, 0), -100);
    }

    #[test]
    fn legacy_difference_matches_old_precedence() {
        let mode = DifferenceMode::Legacy;
        assert_eq!(mode.difference(100, 0, 0), 100);
        assert_eq!(mode.difference(0, 100, 0), 0);
        assert_eq!(mode.difference(0xF0, 0x0F, 0), 0xF0);
        assert_eq!(mode.difference(0xFF, 0x0F, 0), 0xF0);
    }

    #[test]
    fn display_prints_each_channel() {
        let snr = ChannelSnr {
            red: 1.0,
            green: 2.5,
            blue: f64::INFINITY,
        };
        assert_eq!(snr.to_string(), "R: 1.00 dB, G: 2.50 dB, B: inf dB");
        assert!(!snr.is_lossless());
    }
}

//! # grid_mark 库
//!
//! 本库包含网格水印的核心逻辑：生成水印位掩码、清零保留位，
//! 以及按通道计算水印带来的信噪比。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod distortion;
pub mod error;
pub mod handler;
pub mod logger;
pub mod mask;
pub mod pixels;
pub mod watermark;

pub use distortion::{ChannelSnr, DifferenceMode, compute_snr, compute_snr_with};
pub use error::WatermarkError;
pub use mask::{GridCapacity, MaskConfig, generate_mask};
pub use watermark::{PayloadEmbedder, clear_watermark_bits, prepare_and_embed};

//! # 错误类型模块
//!
//! 核心算法 (掩码生成、位清零、SNR 计算) 在前置条件不满足时返回的错误。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimension { width: i64, height: i64 },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Grid spacing must be positive, got {0}")]
    InvalidGridSpacing(u32),

    #[error("Payload embedding failed: {0}")]
    Payload(String),
}

pub type Result<T> = std::result::Result<T, WatermarkError>;

/// 小网格中相邻水印点之间的默认间距 (像素)。
pub const SMALL_GRID_SPACING: u32 = 32;

/// 大网格中相邻水印点之间的默认间距 (像素)。
pub const LARGE_GRID_SPACING: u32 = 128;

/// 未保留任何位的掩码值 (仅保留低 24 位的 RGB 数据)。
pub const FULL_MASK: u32 = 0xFF_FF_FF;

/// 小网格点使用的掩码：为每个通道保留最低有效位。
pub const SMALL_GRID_MASK: u32 = 0xFE_FE_FE;

/// 大网格点使用的掩码：为每个通道保留从低位数第 4 位。
pub const LARGE_GRID_MASK: u32 = 0xEF_EF_EF;

/// 单个 8 位通道的最大强度值，用于计算 SNR。
pub const MAX_INTENSITY: f64 = 255.0;

/// 每个保留位置可携带的水印位数 (每个 RGB 通道 1 位)。
pub const BITS_PER_POSITION: usize = 3;

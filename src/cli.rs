//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 命令行只是核心算法外的一层薄封装：负责读取图像、调用核心函数并保存或报告结果。

use crate::constants::{LARGE_GRID_SPACING, SMALL_GRID_SPACING};
use clap::Parser;
use std::path::PathBuf;

/// 为无损格式图像 (如 PNG, BMP) 预留网格水印位，并测量水印带来的逐通道失真。
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：prepare (清零水印位) 和 snr (计算信噪比)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 清除图像中保留给水印的位，并保存结果图像。
    Prepare(PrepareArgs),

    /// 计算原图与修改后图像之间 R/G/B 各通道的信噪比 (dB)。
    Snr(SnrArgs),
}

/// 'prepare' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct PrepareArgs {
    /// 输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 结果图像的输出路径。默认为输入文件旁的 `prepared_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 小网格间距 (像素)。
    #[arg(long, default_value_t = SMALL_GRID_SPACING)]
    pub small_spacing: u32,

    /// 大网格间距 (像素)。
    #[arg(long, default_value_t = LARGE_GRID_SPACING)]
    pub large_spacing: u32,
}

/// 'snr' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct SnrArgs {
    /// 原始图像文件路径。
    #[arg(short, long)]
    pub original: PathBuf,

    /// 修改后 (已加水印) 的图像文件路径。
    #[arg(short, long)]
    pub modified: PathBuf,

    /// 使用旧实现的通道差值计算方式。
    #[arg(long)]
    pub legacy: bool,
}

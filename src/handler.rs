//! # 命令处理逻辑模块
//!
//! 包含处理 `prepare` 和 `snr` 子命令的高级业务逻辑。
//! 本模块负责协调图像文件 I/O、调用核心算法以及向用户报告结果。

use crate::cli::{PrepareArgs, SnrArgs};
use crate::distortion::{ChannelSnr, DifferenceMode, compute_snr_with};
use crate::mask::MaskConfig;
use crate::pixels::{from_packed_rgb, to_packed_rgb};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::info;

/// 处理 'Prepare' 命令的执行逻辑。
///
/// 负责读取输入图像、按网格配置清除水印保留位，最后将结果写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 网格间距为 0。
/// * 无法读取或解码输入图像。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_prepare(args: PrepareArgs) -> Result<()> {
    let config = MaskConfig::new(args.small_spacing, args.large_spacing)
        .context("Invalid watermark grid configuration")?;

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, "prepared_", "png"));
    ensure_writable(&dest, args.force)?;

    let image = load_rgb(&args.image)?;
    let (width, height) = image.dimensions();
    let mut pixels = to_packed_rgb(&image);

    config
        .clear_bits(&mut pixels, i64::from(width), i64::from(height))
        .context("Failed to clear watermark bits")?;
    let capacity = config.reserved_positions(i64::from(width), i64::from(height))?;
    info!(width, height, ?capacity, "prepared image");

    let prepared = from_packed_rgb(width, height, &pixels)?;
    prepared.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Reserved {} small-grid and {} large-grid positions ({} bits).",
        capacity.small_positions.to_string().green(),
        capacity.large_positions.to_string().green(),
        capacity.total_bits().to_string().green().bold()
    );
    println!(
        "The prepared image has been saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Snr' 命令的执行逻辑。
///
/// 读取两幅尺寸相同的图像并计算各通道信噪比，打印后返回结果。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码任一图像。
/// * 两幅图像尺寸不同。
pub fn handle_snr(args: SnrArgs) -> Result<ChannelSnr> {
    let original = load_rgb(&args.original)?;
    let modified = load_rgb(&args.modified)?;

    anyhow::ensure!(
        original.dimensions() == modified.dimensions(),
        "Image dimensions differ. \nOriginal: {:?}, Modified: {:?}",
        original.dimensions(),
        modified.dimensions()
    );

    let mode = if args.legacy {
        DifferenceMode::Legacy
    } else {
        DifferenceMode::Masked
    };
    let snr = compute_snr_with(&to_packed_rgb(&original), &to_packed_rgb(&modified), mode)?;

    println!(
        "SNR  {} {:.2} dB  {} {:.2} dB  {} {:.2} dB",
        "R".red().bold(),
        snr.red,
        "G".green().bold(),
        snr.green,
        "B".blue().bold(),
        snr.blue
    );

    Ok(snr)
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.to_rgb8())
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在输入文件所在目录下生成 `<prefix><文件名>.<extension>` 形式的默认输出路径。
fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

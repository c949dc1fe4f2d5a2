use clap::Parser;

use grid_mark::{
    cli::{Cli, Commands},
    handler::{handle_prepare, handle_snr},
    logger,
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令（`prepare` 或 `snr`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Prepare(args) => handle_prepare(args),
        Commands::Snr(args) => handle_snr(args).map(|_| ()),
    }
}

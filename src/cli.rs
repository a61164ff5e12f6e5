//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{
    DEFAULT_PERCENT_GRAIN, EXIT_INVALID_ARGUMENTS, EXIT_INVALID_OPERATION, EXIT_SUCCESS,
};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在位图像素中嵌入或提取任意数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在位图像素中嵌入或提取任意数据。\n嵌入和提取时必须使用相同的每像素比特数。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub progress: ProgressArgs,

    /// 输出调试日志 (也可以通过 RUST_LOG 控制)。
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将数据文件嵌入到位图的像素中。
    Embed(EmbedArgs),

    /// 从经过嵌入的位图中提取数据文件。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct EmbedArgs {
    /// 原始位图路径，只读打开。
    pub original: PathBuf,

    /// 要嵌入的数据文件路径。
    pub source: PathBuf,

    /// 嵌入完成后保存结果位图的路径。
    pub destination: PathBuf,

    /// 每个像素用于承载数据的比特数，必须是 3 到 24 之间的 3 的倍数。
    pub bits_per_pixel: u8,
}

/// 'extract' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// 已嵌入数据的位图路径。
    pub source: PathBuf,

    /// 提取出的数据的保存路径。
    pub destination: PathBuf,

    /// 每个像素用于承载数据的比特数，必须与嵌入时一致。
    pub bits_per_pixel: u8,
}

/// 进度显示方式。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// 每次打印 "Percent complete: N"。
    #[default]
    Percent,
    /// 每次打印一个 '*'。
    Asterisk,
    /// 不显示进度。
    #[value(name = "none")]
    Silent,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ProgressArgs {
    /// 进度显示方式。
    #[arg(long, value_enum, default_value_t = ProgressStyle::Percent, global = true)]
    pub progress: ProgressStyle,

    /// 每完成多少个百分点报告一次进度 (1-100)。
    #[arg(
        long,
        default_value_t = DEFAULT_PERCENT_GRAIN,
        value_parser = clap::value_parser!(u8).range(1..=100),
        global = true
    )]
    pub grain: u8,
}

impl Default for ProgressArgs {
    fn default() -> Self {
        ProgressArgs {
            progress: ProgressStyle::default(),
            grain: DEFAULT_PERCENT_GRAIN,
        }
    }
}

/// 命令行解析失败时的退出码。
///
/// 未知子命令返回 [`EXIT_INVALID_OPERATION`]，帮助和版本信息返回 [`EXIT_SUCCESS`]，
/// 其余用法错误返回 [`EXIT_INVALID_ARGUMENTS`]。
pub fn usage_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        ErrorKind::InvalidSubcommand => EXIT_INVALID_OPERATION,
        _ => EXIT_INVALID_ARGUMENTS,
    }
}

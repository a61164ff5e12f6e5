//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责配置进度显示、调用嵌入/提取流程以及向用户报告结果。

use crate::cli::{EmbedArgs, ExtractArgs, ProgressArgs, ProgressStyle};
use crate::constants::{EXIT_INVALID_ARGUMENTS, EXIT_OPERATION_FAILED};
use crate::engine::{Steganographer, Steganography};
use crate::error::{ErrorKind, StegError};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

fn percentage_progress(percent: u8) {
    println!("Percent complete: {percent}");
}

fn asterisk_progress(_percent: u8) {
    print!("*");
    let _ = io::stdout().flush();
}

/// 根据命令行选项注册对应的进度回调。
fn configure_progress(steg: &mut dyn Steganographer, progress: ProgressArgs) -> Result<()> {
    match progress.progress {
        ProgressStyle::Percent => {
            steg.register_progress_callback(Box::new(percentage_progress), progress.grain)?
        }
        ProgressStyle::Asterisk => {
            steg.register_progress_callback(Box::new(asterisk_progress), progress.grain)?
        }
        ProgressStyle::Silent => {}
    }
    Ok(())
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和比特密度的 `EmbedArgs` 结构体。
/// * `progress` - 进度显示选项。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 每像素比特数不是 3 到 24 之间的 3 的倍数。
/// * 无法读取原始图像或数据文件。
/// * 图像没有足够的空间来嵌入数据。
/// * 无法写入目标图像文件。
pub fn handle_embed(args: EmbedArgs, progress: ProgressArgs) -> Result<()> {
    embed_with(&mut Steganography::new(), args, progress)
}

/// 使用给定的引擎执行 'Embed' 命令。
pub fn embed_with(
    steg: &mut dyn Steganographer,
    args: EmbedArgs,
    progress: ProgressArgs,
) -> Result<()> {
    configure_progress(steg, progress)?;

    steg.embed(
        &args.original,
        &args.source,
        &args.destination,
        args.bits_per_pixel,
    )
    .with_context(|| {
        format!(
            "Unable to embed '{}' into '{}'",
            args.source.to_string_lossy().red().bold(),
            args.original.to_string_lossy().red().bold()
        )
    })?;

    if progress.progress == ProgressStyle::Asterisk {
        println!();
    }
    println!(
        "The data has been successfully embedded and saved: {}",
        args.destination.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和比特密度的 `ExtractArgs` 结构体。
/// * `progress` - 进度显示选项。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 每像素比特数非法。
/// * 无法读取图像，或无法写入目标数据文件。
/// * 图像中读出的长度与图像容量不符 (图像未经嵌入或比特密度不一致)。
pub fn handle_extract(args: ExtractArgs, progress: ProgressArgs) -> Result<()> {
    extract_with(&mut Steganography::new(), args, progress)
}

/// 使用给定的引擎执行 'Extract' 命令。
pub fn extract_with(
    steg: &mut dyn Steganographer,
    args: ExtractArgs,
    progress: ProgressArgs,
) -> Result<()> {
    configure_progress(steg, progress)?;

    steg.extract(&args.source, &args.destination, args.bits_per_pixel)
        .with_context(|| {
            format!(
                "Unable to extract data from '{}'. \nThe image may not contain embedded data, or was embedded with a different bits per pixel.",
                args.source.to_string_lossy().red().bold()
            )
        })?;

    if progress.progress == ProgressStyle::Asterisk {
        println!();
    }
    println!(
        "The data has been successfully extracted and saved: {}",
        args.destination.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 操作失败时的退出码：参数错误返回 [`EXIT_INVALID_ARGUMENTS`]，
/// 其余错误返回 [`EXIT_OPERATION_FAILED`]。
pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<StegError>())
        .map(StegError::kind);
    match kind {
        Some(ErrorKind::InvalidParameter) => EXIT_INVALID_ARGUMENTS,
        _ => EXIT_OPERATION_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressCallback;
    use std::path::{Path, PathBuf};

    /// 只记录调用的引擎。
    #[derive(Default)]
    struct RecordingEngine {
        calls: Vec<String>,
        grain: Option<u8>,
    }

    impl Steganographer for RecordingEngine {
        fn embed(
            &mut self,
            original_bitmap: &Path,
            source_data: &Path,
            destination_bitmap: &Path,
            bits_per_pixel: u8,
        ) -> crate::error::Result<()> {
            self.calls.push(format!(
                "embed {} {} {} {bits_per_pixel}",
                original_bitmap.display(),
                source_data.display(),
                destination_bitmap.display()
            ));
            Ok(())
        }

        fn extract(
            &mut self,
            source_bitmap: &Path,
            destination_data: &Path,
            bits_per_pixel: u8,
        ) -> crate::error::Result<()> {
            self.calls.push(format!(
                "extract {} {} {bits_per_pixel}",
                source_bitmap.display(),
                destination_data.display()
            ));
            Ok(())
        }

        fn register_progress_callback(
            &mut self,
            _callback: ProgressCallback,
            percent_grain: u8,
        ) -> crate::error::Result<()> {
            self.grain = Some(percent_grain);
            Ok(())
        }
    }

    #[test]
    fn embed_goes_through_the_engine_interface() {
        let mut engine = RecordingEngine::default();
        let args = EmbedArgs {
            original: PathBuf::from("in.bmp"),
            source: PathBuf::from("data.bin"),
            destination: PathBuf::from("out.bmp"),
            bits_per_pixel: 6,
        };
        let progress = ProgressArgs {
            progress: ProgressStyle::Percent,
            grain: 20,
        };
        embed_with(&mut engine, args, progress).unwrap();
        assert_eq!(engine.calls, vec!["embed in.bmp data.bin out.bmp 6"]);
        assert_eq!(engine.grain, Some(20));
    }

    #[test]
    fn silent_progress_registers_no_callback() {
        let mut engine = RecordingEngine::default();
        let args = ExtractArgs {
            source: PathBuf::from("in.bmp"),
            destination: PathBuf::from("out.bin"),
            bits_per_pixel: 9,
        };
        let progress = ProgressArgs {
            progress: ProgressStyle::Silent,
            grain: 10,
        };
        extract_with(&mut engine, args, progress).unwrap();
        assert_eq!(engine.calls, vec!["extract in.bmp out.bin 9"]);
        assert_eq!(engine.grain, None);
    }

    #[test]
    fn invalid_density_is_an_argument_error() {
        let args = EmbedArgs {
            original: PathBuf::from("missing.bmp"),
            source: PathBuf::from("missing.bin"),
            destination: PathBuf::from("never.bmp"),
            bits_per_pixel: 5,
        };
        let err = handle_embed(args, ProgressArgs::default()).unwrap_err();
        assert_eq!(failure_exit_code(&err), EXIT_INVALID_ARGUMENTS);
    }

    #[test]
    fn missing_bitmap_is_an_operation_failure() {
        let args = ExtractArgs {
            source: PathBuf::from("missing.bmp"),
            destination: PathBuf::from("never.bin"),
            bits_per_pixel: 6,
        };
        let err = handle_extract(args, ProgressArgs::default()).unwrap_err();
        assert_eq!(failure_exit_code(&err), EXIT_OPERATION_FAILED);
        assert!(!PathBuf::from("never.bin").exists());
    }

    #[test]
    fn unrelated_error_is_an_operation_failure() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(failure_exit_code(&err), EXIT_OPERATION_FAILED);
    }
}

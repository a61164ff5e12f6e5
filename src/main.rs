use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use std::process::ExitCode;

use lsb_embed::{
    cli::{Cli, Commands, usage_exit_code},
    constants::EXIT_SUCCESS,
    handler::{failure_exit_code, handle_embed, handle_extract},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令（`embed` 或 `extract`）
/// 将执行分派到相应的处理函数，最后把结果映射为进程退出码
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(err.kind()));
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let result = match cli.command {
        Commands::Embed(args) => handle_embed(args, cli.progress),
        Commands::Extract(args) => handle_extract(args, cli.progress),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(failure_exit_code(&err))
        }
    }
}

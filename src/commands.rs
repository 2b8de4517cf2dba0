//! 命令调度模块：
//! - 接收解析好的 CLI 参数，计算“有效参数”
//! - 调用项目创建流程，并把结果转为面向用户的输出与退出状态

use colored::Colorize;
use std::{env, path::PathBuf};

use crate::{
    cli::Cli,
    error::ScaffoldError,
    scaffold::{create_project, ScaffoldOptions},
    toolchain::Uv,
    utils::env_opt_path,
    ExitStatus,
};

/// `--uv` 未指定时读取的环境变量
pub const UV_ENV: &str = "CREATE_FASTAPI_APP_UV";

/// 运行一次项目创建
pub fn run(cli: Cli) -> ExitStatus {
    let parent_dir = match cli.dir {
        Some(d) => d,
        None => match env::current_dir() {
            Ok(d) => d,
            Err(e) => {
                report_error(&ScaffoldError::WorkingDir(e));
                return ExitStatus::Error;
            }
        },
    };
    let program = cli
        .uv
        .or_else(|| env_opt_path(UV_ENV))
        .unwrap_or_else(|| PathBuf::from("uv"));
    let options = ScaffoldOptions::new(cli.project_name, parent_dir)
        .with_verbose(cli.verbose);
    let uv = Uv::new(program, options.stdio_mode());
    log::debug!("using toolchain at {}", uv.program().display());

    match create_project(&options, &uv) {
        Ok(_) => {
            print_next_steps(&options.name);
            ExitStatus::Success
        }
        Err(err) => {
            report_error(&err);
            ExitStatus::Error
        }
    }
}

fn print_next_steps(name: &str) {
    println!("{}", "\n✅ Project created successfully!\n".green());
    println!("{}", "To get started:\n".cyan());
    println!("{}", format!("  cd {name}").as_str().white());
    println!("{}", "  uv run uvicorn app.main:app --reload".white());
    println!("{}", "\nYour API will be running at:".bright_black());
    println!("{}", "  http://localhost:8000".bright_black());
    println!(
        "{}",
        "  http://localhost:8000/docs (API documentation)\n".bright_black()
    );
}

/// 按错误类别输出提示；只有写文件失败时打印完整错误链
fn report_error(err: &ScaffoldError) {
    log::debug!("aborting: {err:?}");
    match err {
        ScaffoldError::ToolchainMissing => {
            eprintln!("{}", "\n❌ Error: uv is not installed".red());
            eprintln!(
                "{}",
                "Install it with: curl -LsSf https://astral.sh/uv/install.sh | sh\n".yellow()
            );
        }
        ScaffoldError::InvalidName { .. } | ScaffoldError::TargetExists { .. } => {
            eprintln!("{}", format!("\n❌ Error: {err}\n").as_str().red());
        }
        ScaffoldError::Command { stage, stderr, .. } => {
            eprintln!("{} {}", "✖".red(), stage.failure_message().red());
            if !stderr.is_empty() {
                eprintln!("{}", stderr.as_str().bright_black());
            }
        }
        ScaffoldError::Spawn { stage, source } => {
            eprintln!("{} {}", "✖".red(), stage.failure_message().red());
            eprintln!("{}", source.to_string().as_str().bright_black());
        }
        ScaffoldError::Materialize(cause) => {
            eprintln!("{} {}", "✖".red(), "Failed to create project files".red());
            eprintln!("{cause:?}");
        }
        ScaffoldError::WorkingDir(_) => {
            eprintln!("{}", format!("\n❌ Error: {err}\n").as_str().red());
        }
    }
}

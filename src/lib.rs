//! 创建带完整工具配置的 FastAPI 项目：
//! 调用 `uv` 初始化骨架并安装依赖，然后写出固定的项目模板。

mod cli;
mod commands;
pub mod error;
pub mod materialize;
pub mod preflight;
pub mod scaffold;
pub mod templates;
pub mod toolchain;
mod utils;

use clap::Parser;
use std::ffi::OsString;

pub use cli::Cli;
pub use commands::UV_ENV;
pub use error::{ScaffoldError, Stage};
pub use scaffold::{create_project, ScaffoldOptions, DEV_DEPENDENCIES, RUNTIME_DEPENDENCIES};
pub use toolchain::{CommandOutcome, SpawnError, StdioMode, Toolchain, Uv};

/// 进程退出状态：成功为 0，其余一律为 1
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<bool> for ExitStatus {
    fn from(value: bool) -> Self {
        if value {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Error => 1,
        }
    }
}

/// 解析命令行并执行；`--help`/`--version` 视为成功，参数错误视为失败
pub fn run_with_args<T, I>(args: I) -> ExitStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => commands::run(cli),
        Err(e) => {
            let _ = e.print();
            ExitStatus::from(!e.use_stderr())
        }
    }
}

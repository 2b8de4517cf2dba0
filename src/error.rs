//! 错误类型模块：
//! - 前置检查失败（项目名非法、工具链缺失、目标目录已存在）
//! - 外部命令失败（按阶段区分）
//! - 写出项目文件失败

use std::{fmt, io, path::PathBuf};

use crate::toolchain::SpawnError;

/// 外部工具链参与的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `uv init --app <name>`
    Initialize,
    /// 安装运行时依赖
    Dependencies,
    /// 安装开发依赖
    DevDependencies,
}

impl Stage {
    /// 阶段开始时的提示
    pub fn pending_message(self) -> &'static str {
        match self {
            Stage::Initialize => "Initializing project with uv...",
            Stage::Dependencies => "Installing dependencies...",
            Stage::DevDependencies => "Installing dev dependencies...",
        }
    }

    /// 阶段成功时的提示
    pub fn success_message(self) -> &'static str {
        match self {
            Stage::Initialize => "Project initialized",
            Stage::Dependencies => "Core dependencies installed",
            Stage::DevDependencies => "Dev dependencies installed",
        }
    }

    /// 阶段失败时的提示
    pub fn failure_message(self) -> &'static str {
        match self {
            Stage::Initialize => "Failed to initialize project",
            Stage::Dependencies => "Failed to install dependencies",
            Stage::DevDependencies => "Failed to install dev dependencies",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Initialize => "initialize",
            Stage::Dependencies => "dependencies",
            Stage::DevDependencies => "dev-dependencies",
        };
        f.write_str(name)
    }
}

/// 脚手架流程中的全部致命错误，均以退出码 1 结束
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("uv is not installed")]
    ToolchainMissing,
    #[error("Directory '{name}' already exists")]
    TargetExists { name: String, path: PathBuf },
    #[error(
        "{} (stage `{stage}`, exit code {})",
        .stage.failure_message(),
        describe_exit(.exit_code)
    )]
    Command {
        stage: Stage,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("{} (stage `{stage}`): {source}", .stage.failure_message())]
    Spawn {
        stage: Stage,
        #[source]
        source: SpawnError,
    },
    #[error("Failed to create project files: {0:#}")]
    Materialize(anyhow::Error),
    #[error("failed to determine the current working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

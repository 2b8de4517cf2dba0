//! 外部工具链模块：
//! - 同步执行外部命令，按模式继承/捕获/丢弃标准输出
//! - 将执行结果归纳为 `CommandOutcome`（退出码 + stderr 片段）
//! - `Toolchain` 抽象 uv 的三类调用，便于替换

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// stderr 片段保留的最大行数
const STDERR_SNIPPET_LINES: usize = 10;

/// 子进程标准输入输出的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// 丢弃所有输出
    Suppress,
    /// 捕获输出，失败时可以给出 stderr 片段
    Capture,
    /// 直接继承当前终端
    Inherit,
}

/// 一次外部命令的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// 进程退出码；被信号终止时为 None
    pub exit_code: Option<i32>,
    /// stderr 末尾若干非空行（仅 `StdioMode::Capture` 时有内容）
    pub stderr_snippet: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// 子进程无法启动（找不到程序、无权限等）
#[derive(Debug, thiserror::Error)]
#[error("failed to run `{program}`: {source}")]
pub struct SpawnError {
    pub program: String,
    #[source]
    pub source: io::Error,
}

/// 同步执行一条外部命令，阻塞直到进程结束
pub fn run_external_command<S: AsRef<OsStr>>(
    program: &Path,
    args: &[S],
    cwd: Option<&Path>,
    mode: StdioMode,
) -> Result<CommandOutcome, SpawnError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    log::debug!(
        "running `{}` in {}",
        describe_command(program, args),
        cwd.map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );

    let spawn_err = |source: io::Error| SpawnError {
        program: program.display().to_string(),
        source,
    };

    let outcome = match mode {
        StdioMode::Suppress => {
            let status = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(spawn_err)?;
            CommandOutcome {
                exit_code: status.code(),
                stderr_snippet: String::new(),
            }
        }
        StdioMode::Capture => {
            let output = cmd.stdin(Stdio::null()).output().map_err(spawn_err)?;
            CommandOutcome {
                exit_code: output.status.code(),
                stderr_snippet: stderr_snippet(&output.stderr),
            }
        }
        StdioMode::Inherit => {
            let status = cmd.status().map_err(spawn_err)?;
            CommandOutcome {
                exit_code: status.code(),
                stderr_snippet: String::new(),
            }
        }
    };

    if outcome.success() {
        log::trace!("`{}` succeeded", describe_command(program, args));
    } else {
        log::warn!(
            "`{}` exited with {:?}",
            describe_command(program, args),
            outcome.exit_code
        );
    }
    Ok(outcome)
}

/// 取 stderr 末尾的若干非空行
pub(crate) fn stderr_snippet(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_SNIPPET_LINES);
    lines[start..].join("\n")
}

fn describe_command<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    let mut s = program.display().to_string();
    for a in args {
        s.push(' ');
        s.push_str(&a.as_ref().to_string_lossy());
    }
    s
}

/// 外部包管理器需要提供的操作
pub trait Toolchain {
    /// 版本查询，用于判断工具链是否可用
    fn version(&self) -> Result<CommandOutcome, SpawnError>;
    /// 在 `parent_dir` 下创建名为 `name` 的应用骨架
    fn init_app(&self, parent_dir: &Path, name: &str) -> Result<CommandOutcome, SpawnError>;
    /// 在项目根目录内安装一组依赖，`dev` 为真时安装为开发依赖
    fn add(
        &self,
        project_root: &Path,
        packages: &[&str],
        dev: bool,
    ) -> Result<CommandOutcome, SpawnError>;
}

/// 基于 `uv` 可执行文件的实现
#[derive(Debug, Clone)]
pub struct Uv {
    program: PathBuf,
    mode: StdioMode,
}

impl Uv {
    pub fn new(program: impl Into<PathBuf>, mode: StdioMode) -> Self {
        Self {
            program: program.into(),
            mode,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Uv {
    fn default() -> Self {
        Self::new("uv", StdioMode::Capture)
    }
}

impl Toolchain for Uv {
    fn version(&self) -> Result<CommandOutcome, SpawnError> {
        run_external_command(&self.program, &["--version"], None, StdioMode::Suppress)
    }

    fn init_app(&self, parent_dir: &Path, name: &str) -> Result<CommandOutcome, SpawnError> {
        run_external_command(
            &self.program,
            &["init", "--app", name],
            Some(parent_dir),
            self.mode,
        )
    }

    fn add(
        &self,
        project_root: &Path,
        packages: &[&str],
        dev: bool,
    ) -> Result<CommandOutcome, SpawnError> {
        let mut args = vec!["add"];
        if dev {
            args.push("--dev");
        }
        args.extend_from_slice(packages);
        run_external_command(&self.program, args.as_slice(), Some(project_root), self.mode)
    }
}

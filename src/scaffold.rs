//! 项目创建流程：
//! 前置检查 -> `uv init` -> 安装依赖 -> 写出项目文件。
//! 每一步都以上一步成功为前提，任一步失败立即返回，不做清理。
//! 项目根目录在开始时计算一次，之后的步骤都显式传入该路径，
//! 不修改进程工作目录。

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::{
    error::{ScaffoldError, Stage},
    materialize::materialize,
    preflight::{check_target_free, check_toolchain_available},
    toolchain::{CommandOutcome, SpawnError, StdioMode, Toolchain},
    utils::validate_project_name,
};

/// 运行时依赖，一次 `uv add` 安装
pub const RUNTIME_DEPENDENCIES: &[&str] =
    &["fastapi", "uvicorn", "python-dotenv", "pydantic-settings"];

/// 开发依赖，一次 `uv add --dev` 安装
pub const DEV_DEPENDENCIES: &[&str] =
    &["pytest", "pytest-asyncio", "httpx", "black", "ruff", "mypy"];

/// 一次创建所需的全部参数
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// 项目名，同时也是目录名
    pub name: String,
    /// 在其下创建项目目录的父目录
    pub parent_dir: PathBuf,
    /// 为真时 uv 的输出直接显示在终端，否则捕获
    pub verbose: bool,
}

impl ScaffoldOptions {
    pub fn new(name: impl Into<String>, parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            parent_dir: parent_dir.into(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn project_root(&self) -> PathBuf {
        self.parent_dir.join(&self.name)
    }

    /// 初始化与安装阶段使用的 stdio 模式
    pub fn stdio_mode(&self) -> StdioMode {
        if self.verbose {
            StdioMode::Inherit
        } else {
            StdioMode::Capture
        }
    }
}

/// 创建项目，成功时返回项目根目录
pub fn create_project(
    options: &ScaffoldOptions,
    toolchain: &dyn Toolchain,
) -> Result<PathBuf, ScaffoldError> {
    let name = options.name.as_str();
    validate_project_name(name).map_err(|reason| ScaffoldError::InvalidName {
        name: name.to_string(),
        reason,
    })?;
    let project_root = options.project_root();

    // 工具链缺失比目录冲突更根本，先检查
    if !check_toolchain_available(toolchain) {
        return Err(ScaffoldError::ToolchainMissing);
    }
    if !check_target_free(&project_root) {
        return Err(ScaffoldError::TargetExists {
            name: name.to_string(),
            path: project_root,
        });
    }

    let banner = format!("\n🚀 Creating FastAPI project: {name}\n");
    println!("{}", banner.as_str().green());
    log::info!("project root: {}", project_root.display());

    run_stage(Stage::Initialize, || {
        toolchain.init_app(&options.parent_dir, name)
    })?;
    run_stage(Stage::Dependencies, || {
        toolchain.add(&project_root, RUNTIME_DEPENDENCIES, false)
    })?;
    run_stage(Stage::DevDependencies, || {
        toolchain.add(&project_root, DEV_DEPENDENCIES, true)
    })?;

    write_project_files(&project_root, name)?;
    Ok(project_root)
}

/// 执行一个工具链阶段；非零退出与无法启动都视为致命错误
fn run_stage<F>(stage: Stage, f: F) -> Result<(), ScaffoldError>
where
    F: FnOnce() -> Result<CommandOutcome, SpawnError>,
{
    println!("{}", stage.pending_message());
    log::debug!("stage `{stage}` started");
    let outcome = f().map_err(|source| ScaffoldError::Spawn { stage, source })?;
    if !outcome.success() {
        return Err(ScaffoldError::Command {
            stage,
            exit_code: outcome.exit_code,
            stderr: outcome.stderr_snippet,
        });
    }
    println!("{} {}", "✔".green(), stage.success_message());
    Ok(())
}

fn write_project_files(project_root: &Path, name: &str) -> Result<(), ScaffoldError> {
    println!("Creating project files...");
    let written = materialize(project_root, name).map_err(ScaffoldError::Materialize)?;
    log::debug!("{} files written under {}", written.len(), project_root.display());
    println!("{} Project files created", "✔".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, fs, io};

    /// 记录调用顺序的假工具链
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        missing: bool,
        fail_at: Option<Stage>,
    }

    impl Recorder {
        fn outcome(&self, stage: Stage) -> CommandOutcome {
            let failed = self.fail_at == Some(stage);
            CommandOutcome {
                exit_code: Some(if failed { 1 } else { 0 }),
                stderr_snippet: if failed {
                    "error: boom".into()
                } else {
                    String::new()
                },
            }
        }
    }

    impl Toolchain for Recorder {
        fn version(&self) -> Result<CommandOutcome, SpawnError> {
            self.calls.borrow_mut().push("version".into());
            if self.missing {
                return Err(SpawnError {
                    program: "uv".into(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            Ok(CommandOutcome {
                exit_code: Some(0),
                stderr_snippet: String::new(),
            })
        }

        fn init_app(&self, parent_dir: &Path, name: &str) -> Result<CommandOutcome, SpawnError> {
            self.calls.borrow_mut().push(format!("init {name}"));
            let root = parent_dir.join(name);
            fs::create_dir(&root).unwrap();
            fs::write(root.join("pyproject.toml"), "[project]\n").unwrap();
            Ok(self.outcome(Stage::Initialize))
        }

        fn add(
            &self,
            _project_root: &Path,
            packages: &[&str],
            dev: bool,
        ) -> Result<CommandOutcome, SpawnError> {
            let flag = if dev { "--dev " } else { "" };
            self.calls.borrow_mut().push(format!("add {flag}{}", packages.join(" ")));
            let stage = if dev {
                Stage::DevDependencies
            } else {
                Stage::Dependencies
            };
            Ok(self.outcome(stage))
        }
    }

    #[test]
    fn stages_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let tc = Recorder::default();
        let root = create_project(&ScaffoldOptions::new("demo", dir.path()), &tc).unwrap();
        assert_eq!(root, dir.path().join("demo"));
        assert_eq!(
            *tc.calls.borrow(),
            vec![
                "version".to_string(),
                "init demo".to_string(),
                "add fastapi uvicorn python-dotenv pydantic-settings".to_string(),
                "add --dev pytest pytest-asyncio httpx black ruff mypy".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_name_stops_before_the_toolchain() {
        let dir = tempfile::tempdir().unwrap();
        let tc = Recorder::default();
        let err = create_project(&ScaffoldOptions::new("../evil", dir.path()), &tc).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidName { .. }));
        assert!(tc.calls.borrow().is_empty());
    }

    #[test]
    fn missing_toolchain_is_checked_before_the_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("demo")).unwrap();
        let tc = Recorder {
            missing: true,
            ..Default::default()
        };
        let err = create_project(&ScaffoldOptions::new("demo", dir.path()), &tc).unwrap_err();
        assert!(matches!(err, ScaffoldError::ToolchainMissing));
        assert_eq!(*tc.calls.borrow(), vec!["version".to_string()]);
    }

    #[test]
    fn stage_failure_carries_exit_code_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tc = Recorder {
            fail_at: Some(Stage::Dependencies),
            ..Default::default()
        };
        let err = create_project(&ScaffoldOptions::new("demo", dir.path()), &tc).unwrap_err();
        match err {
            ScaffoldError::Command {
                stage,
                exit_code,
                stderr,
            } => {
                assert_eq!(stage, Stage::Dependencies);
                assert_eq!(exit_code, Some(1));
                assert_eq!(stderr, "error: boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        // 开发依赖阶段不会再执行
        assert_eq!(tc.calls.borrow().len(), 3);
    }

    #[test]
    fn spawn_failure_is_reported_with_its_stage() {
        let err = run_stage(Stage::Initialize, || {
            Err(SpawnError {
                program: "uv".into(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Spawn {
                stage: Stage::Initialize,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Failed to initialize project"));
    }

    #[test]
    fn verbose_selects_inherited_stdio() {
        let options = ScaffoldOptions::new("demo", "/tmp");
        assert!(!options.verbose);
        assert_eq!(options.stdio_mode(), StdioMode::Capture);
        assert_eq!(options.with_verbose(true).stdio_mode(), StdioMode::Inherit);
    }
}

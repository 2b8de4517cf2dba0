//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 参数到实际选项的换算（环境变量回退、默认目录）放在 commands 模块。

use clap::Parser;
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(
    name = "create-fastapi-app",
    about = "Create a FastAPI project with proper tooling",
    version
)]
pub struct Cli {
    /// Name of the project to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,
    /// Parent directory to create the project in (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// Path to the uv executable (default: $CREATE_FASTAPI_APP_UV, then `uv`)
    #[arg(long, value_name = "PATH")]
    pub uv: Option<PathBuf>,
    /// Show uv output instead of capturing it
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_name_and_options() {
        let cli =
            Cli::try_parse_from(["create-fastapi-app", "demo", "--dir", "/tmp", "-v"]).unwrap();
        assert_eq!(cli.project_name, "demo");
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp")));
        assert_eq!(cli.uv, None);
        assert!(cli.verbose);
    }

    #[test]
    fn project_name_is_required() {
        assert!(Cli::try_parse_from(["create-fastapi-app"]).is_err());
    }
}

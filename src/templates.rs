//! 模板目录（Template Store）：
//! - 固定的「相对路径 -> 文件内容」列表，编译期内置
//! - README 由项目名生成，是唯一需要替换内容的条目

use anyhow::{Context, Result};
use tera::{Context as TContext, Tera};

const ENV: &str = include_str!("assets/templates/env");
const CONFIG_PY: &str = include_str!("assets/templates/config.py");
const MAIN_PY: &str = include_str!("assets/templates/main.py");
const TEST_MAIN_PY: &str = include_str!("assets/templates/test_main.py");
const GITIGNORE: &str = include_str!("assets/templates/gitignore");
const MAKEFILE: &str = include_str!("assets/templates/Makefile");
const README_TEMPLATE: &str = include_str!("assets/README.md.tera");

/// 追加到 `pyproject.toml` 末尾的工具配置块
pub const PYPROJECT_TOOLS: &str = include_str!("assets/pyproject_tools.toml");

/// 由 `uv init` 创建、随后被追加内容的清单文件
pub const MANIFEST_PATH: &str = "pyproject.toml";
/// 环境变量模板
pub const ENV_PATH: &str = ".env";
/// `.env` 的示例副本
pub const ENV_EXAMPLE_PATH: &str = ".env.example";
/// 生成的说明文档
pub const README_PATH: &str = "README.md";
/// 包初始化标记文件，内容恒为空
pub const PACKAGE_MARKERS: &[&str] = &["app/__init__.py", "tests/__init__.py"];

/// 模板内容：固定文本，或由项目名生成
#[derive(Clone, Copy)]
pub enum Content {
    Static(&'static str),
    Generated(fn(&str) -> Result<String>),
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Static(s) => f.debug_tuple("Static").field(&s.len()).finish(),
            Content::Generated(_) => f.write_str("Generated"),
        }
    }
}

/// 一条模板记录
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// `/` 分隔的相对路径，在目录内唯一
    pub path: &'static str,
    pub content: Content,
}

impl Template {
    /// 针对某个项目名得到最终写出的文本
    pub fn render(&self, project_name: &str) -> Result<String> {
        match self.content {
            Content::Static(s) => Ok(s.to_string()),
            Content::Generated(f) => {
                f(project_name).with_context(|| format!("生成模板失败: {}", self.path))
            }
        }
    }
}

/// 直接写出的固定模板
static CATALOG: &[Template] = &[
    Template {
        path: ENV_PATH,
        content: Content::Static(ENV),
    },
    Template {
        path: "app/config.py",
        content: Content::Static(CONFIG_PY),
    },
    Template {
        path: "app/main.py",
        content: Content::Static(MAIN_PY),
    },
    Template {
        path: "tests/test_main.py",
        content: Content::Static(TEST_MAIN_PY),
    },
    Template {
        path: ".gitignore",
        content: Content::Static(GITIGNORE),
    },
    Template {
        path: "Makefile",
        content: Content::Static(MAKEFILE),
    },
];

/// 派生文件：README
pub static README: Template = Template {
    path: README_PATH,
    content: Content::Generated(render_readme),
};

/// 遍历全部固定模板
pub fn catalog() -> &'static [Template] {
    CATALOG
}

/// 按相对路径查找模板
pub fn lookup(path: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.path == path)
}

/// 用项目名渲染 README
pub fn render_readme(project_name: &str) -> Result<String> {
    let mut ctx = TContext::new();
    ctx.insert("project_name", project_name);
    Tera::one_off(README_TEMPLATE, &ctx, false).context("渲染 README 模板失败")
}

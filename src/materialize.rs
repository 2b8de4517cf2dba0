//! 项目文件写出模块：
//! - 逐条写出模板目录中的文件（自动创建父目录，存在则覆盖）
//! - 派生文件：包初始化标记、`.env.example`、README
//! - 向 `uv init` 生成的 `pyproject.toml` 追加工具配置
//!
//! 任一写入失败即返回错误；已写出的文件保留在磁盘上，不做回滚。

use anyhow::{anyhow, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    templates::{
        self, ENV_EXAMPLE_PATH, ENV_PATH, MANIFEST_PATH, PACKAGE_MARKERS, PYPROJECT_TOOLS,
    },
    utils::safe_subpath,
};

/// 在项目根目录下写出一个文件，必要时创建父目录
pub fn write_file(project_root: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    let rel = safe_subpath(relative_path)
        .ok_or_else(|| anyhow!("拒绝写出项目目录之外的路径: {}", relative_path))?;
    let out_path = project_root.join(rel);
    if let Some(parent) = out_path.parent() {
        if !parent.is_dir() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }
    }
    fs::write(&out_path, content.as_bytes())
        .with_context(|| format!("写入文件失败: {}", out_path.display()))?;
    log::debug!("写入: {}", out_path.display());
    Ok(out_path)
}

/// 若清单文件存在，则在其末尾追加工具配置块。
/// 只追加不替换：重复执行会让配置块出现多次。
pub fn append_manifest_config(project_root: &Path) -> Result<bool> {
    let manifest = project_root.join(MANIFEST_PATH);
    if !manifest.exists() {
        log::warn!("未找到 {}，跳过追加工具配置", manifest.display());
        return Ok(false);
    }
    let mut text = fs::read_to_string(&manifest)
        .with_context(|| format!("读取清单失败: {}", manifest.display()))?;
    text.push_str(PYPROJECT_TOOLS);
    fs::write(&manifest, text)
        .with_context(|| format!("写回清单失败: {}", manifest.display()))?;
    log::debug!("追加工具配置: {}", manifest.display());
    Ok(true)
}

/// 写出全部项目文件，返回写出的路径（按写出顺序）
pub fn materialize(project_root: &Path, project_name: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for t in templates::catalog() {
        let content = t.render(project_name)?;
        written.push(write_file(project_root, t.path, &content)?);
    }

    for marker in PACKAGE_MARKERS {
        written.push(write_file(project_root, marker, "")?);
    }

    let env = templates::lookup(ENV_PATH)
        .ok_or_else(|| anyhow!("模板目录缺少 {}", ENV_PATH))?
        .render(project_name)?;
    written.push(write_file(project_root, ENV_EXAMPLE_PATH, &env)?);

    if append_manifest_config(project_root)? {
        written.push(project_root.join(MANIFEST_PATH));
    }

    let readme = templates::README.render(project_name)?;
    written.push(write_file(project_root, templates::README.path, &readme)?);

    Ok(written)
}

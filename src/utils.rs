//! 通用辅助函数：
//! - 环境变量读取（作为命令行参数的回退）
//! - 相对子路径校验、项目名校验

use std::{
    env,
    path::{Component, Path, PathBuf},
};

/// 可选读取 PATH 环境变量为 PathBuf。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// 将 `/` 分隔的字符串转为项目内的相对子路径。
/// 出现 `..`、绝对路径或空片段时返回 None。
pub(crate) fn safe_subpath(s: &str) -> Option<PathBuf> {
    let mut p = PathBuf::new();
    for seg in s.split('/') {
        if seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\') {
            return None;
        }
        p.push(seg);
    }
    let normal_only = p.components().all(|c| matches!(c, Component::Normal(_)));
    if normal_only && p.components().next().is_some() {
        Some(p)
    } else {
        None
    }
}

/// 校验项目名：非空、不能是 `.`/`..`、不能包含路径分隔符。
pub(crate) fn validate_project_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name must not be empty");
    }
    if name == "." || name == ".." {
        return Err("name must not be `.` or `..`");
    }
    if name.contains('/') || name.contains('\\') {
        return Err("name must not contain path separators");
    }
    // 以 `-` 开头会被 uv 当作选项解析
    if name.starts_with('-') {
        return Err("name must not start with `-`");
    }
    if Path::new(name).is_absolute() {
        return Err("name must not be an absolute path");
    }
    Ok(())
}

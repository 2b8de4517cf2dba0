//! 前置检查：工具链是否可用、目标目录是否空闲。
//! 两项检查都只做查询，不产生副作用。

use std::{fs, path::Path};

use crate::toolchain::Toolchain;

/// 版本查询成功返回（退出码为 0）即视为工具链可用
pub fn check_toolchain_available(toolchain: &dyn Toolchain) -> bool {
    match toolchain.version() {
        Ok(outcome) => outcome.success(),
        Err(err) => {
            log::debug!("toolchain unavailable: {err}");
            false
        }
    }
}

/// 路径上没有任何文件系统条目（包括悬空的符号链接）时返回 true
pub fn check_target_free(path: &Path) -> bool {
    fs::symlink_metadata(path).is_err()
}

//! # Error 模块
//!
//! 定义 kn-runtime 中使用的错误类型。
//!
//! 解析本身是全函数（无法识别的行退化为 [`Command::None`]），
//! 唯一的失败路径是脚本文件无法打开。
//!
//! [`Command::None`]: crate::command::Command::None

use std::path::PathBuf;
use thiserror::Error;

/// 脚本加载错误
#[derive(Error, Debug)]
pub enum ScriptError {
    /// 脚本文件无法打开/读取
    #[error("无法打开脚本文件 {path}: {source}")]
    FileOpen {
        /// 尝试打开的路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },
}

/// Result 类型别名
pub type ScriptResult<T> = Result<T, ScriptError>;

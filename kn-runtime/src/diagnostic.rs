//! # 诊断模块
//!
//! 宽容语法的补偿通道：加载脚本时，解析为空操作的行被记录在
//! [`LoadReport`] 中，供日志与工具告警使用。运行时行为不受影响
//! （这些行仍然被静默跳过）。

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
        }
    }
}

/// 诊断条目
///
/// 定位到脚本的某一行（行号从 1 开始）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 行号（从 1 开始）
    pub line: usize,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（通常是原始行内容）
    pub detail: Option<String>,
}

impl Diagnostic {
    /// 创建警告诊断
    pub fn warn(line: usize, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            line,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建信息诊断
    pub fn info(line: usize, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            line,
            message: message.into(),
            detail: None,
        }
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] 第 {} 行: {}", self.level, self.line, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 脚本加载报告
///
/// 加载总是"成功"（除非文件无法打开），报告记录统计信息
/// 和解析为空操作的行。
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// 读取的总行数
    pub lines_total: usize,
    /// 追加到 Sequencer 的条目数
    pub entries_added: usize,
    /// 派发给 Stage 的场景指令数
    pub commands_dispatched: usize,
    /// 空操作行的诊断列表
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否没有任何诊断
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

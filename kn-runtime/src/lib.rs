//! # KN Runtime
//!
//! 线性视觉小说（kinetic novel）引擎的纯逻辑核心。
//!
//! ## 架构概述
//!
//! `kn-runtime` 不依赖任何渲染/音频引擎。它把一份纯文本脚本转换为
//! 两类产物，并通过窄接口与宿主层（Host）协作：
//!
//! ```text
//! 脚本文件 ──逐行──► Parser ──┬─► 场景指令 ──立即──► Stage（宿主实现）
//!                            └─► 对话/旁白 ──追加──► DialogueSequencer
//!
//! 每帧：Host ── update(dt) / advance / retreat / skip ──► Sequencer
//! ```
//!
//! ## 核心类型
//!
//! - [`Command`]：一行脚本解析出的指令
//! - [`Stage`]：场景协作者接口（背景/音乐/音效/立绘，即发即忘）
//! - [`DialogueSequencer`]：游标导航 + 时间驱动的文字显露状态机
//! - [`LoadReport`]：加载统计与空操作行诊断
//!
//! ## 使用示例
//!
//! ```ignore
//! use kn_runtime::{DialogueSequencer, load_script_file};
//!
//! let mut sequencer = DialogueSequencer::new();
//! let report = load_script_file("dialogues/en-us/ch0.txt", &mut stage, &mut sequencer)?;
//!
//! // 主循环
//! loop {
//!     sequencer.update(frame_dt);
//!     if advance_pressed {
//!         if sequencer.is_line_finished() {
//!             sequencer.advance();
//!         } else {
//!             sequencer.skip_to_end();
//!         }
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 与 Position 定义
//! - [`script`]：脚本解析与加载
//! - [`sequencer`]：对话序列器
//! - [`diagnostic`]：加载诊断
//! - [`error`]：错误类型定义

pub mod command;
pub mod diagnostic;
pub mod error;
pub mod script;
pub mod sequencer;

// 重导出核心类型
pub use command::{Command, Position, Rgba};
pub use diagnostic::{Diagnostic, DiagnosticLevel, LoadReport};
pub use error::{ScriptError, ScriptResult};
pub use script::{Stage, load_script_file, load_script_str, parse_line};
pub use sequencer::{DEFAULT_REVEAL_CPS, DialogueEntry, DialogueSequencer};

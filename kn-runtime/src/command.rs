//! # Command 模块
//!
//! 定义脚本行解析产生的指令类型。
//! Command 是 Parser 与宿主层（Host）之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染引擎的类型

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 角色立绘位置
///
/// 脚本中的位置记号解析为此枚举。`Offscreen` 表示宿主层通过
/// 显式坐标放置的角色（解析器不会产生此变体）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// 左侧
    Left,
    /// 中央
    Center,
    /// 右侧
    Right,
    /// 舞台外（显式坐标，由宿主层管理）
    Offscreen,
}

impl Position {
    /// 从脚本记号解析位置，无法识别时回退到 `Center`
    ///
    /// 记号不区分大小写，同时接受英语和西班牙语两套同义词：
    /// `left`/`izquierda`、`center`/`centro`、`right`/`derecha`。
    pub fn parse_or_center(token: &str) -> Self {
        Self::from_str(token).unwrap_or(Self::Center)
    }
}

impl FromStr for Position {
    type Err = ();

    /// 从字符串解析位置（不区分大小写，英/西双语记号）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "izquierda" => Ok(Self::Left),
            "center" | "centro" => Ok(Self::Center),
            "right" | "derecha" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// RGBA 颜色
///
/// 核心层自己的颜色类型，避免依赖渲染引擎。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// 对话文本默认颜色
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// 旁白文本颜色（浅灰）
    pub const NARRATION: Self = Self::new(200, 200, 200, 255);

    /// 创建颜色
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// 一行脚本解析出的指令
///
/// 每个变体只携带自己需要的字段。场景指令
/// （`SetBackground`/`PlayMusic`/`PlaySound`/`ShowCharacter`）在加载时
/// 立即派发给 [`Stage`](crate::script::Stage)；`Dialogue`/`Narration`
/// 转换为 Sequencer 条目；其余不产生任何效果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 空行或无法识别的行（静默忽略）
    None,

    /// 切换背景：`@bg <name>` / `@background <name>`
    SetBackground {
        /// 背景逻辑名称（不含路径与扩展名）
        name: String,
    },

    /// 播放循环音乐：`@music <name>`
    PlayMusic {
        /// 音乐逻辑名称
        name: String,
    },

    /// 播放一次性音效：`@sfx <name>` / `@sound <name>`
    PlaySound {
        /// 音效逻辑名称
        name: String,
    },

    /// 显示角色立绘：`<Name> <emotion> [<position>]`
    ShowCharacter {
        /// 角色名
        name: String,
        /// 表情标签（决定使用哪张立绘）
        emotion: String,
        /// 显示位置
        position: Position,
    },

    /// 对话行：`<Name>: "<text>"`
    Dialogue {
        /// 说话者名称
        speaker: String,
        /// 对话内容
        text: String,
    },

    /// 旁白行：`"<text>"`
    Narration {
        /// 旁白内容
        text: String,
    },

    /// 注释行：`# ...`
    ///
    /// 内容被保留（供工具使用），执行时忽略。
    Comment {
        /// `#` 之后的原始内容
        text: String,
    },
}

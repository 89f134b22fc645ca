//! # Sequencer 模块
//!
//! 对话序列器：持有加载产生的有序对话/旁白条目，暴露基于游标的
//! 导航和基于时间的文字显露状态机，供演出层每帧消费。
//!
//! ## 状态模型
//!
//! ```text
//! Idle        游标停在某条目上，尚未开始显露
//! Revealing   计时器累积，已显露字符数 = floor(elapsed × cps)
//! LineComplete 当前条目全部字符可见
//! Finished    index == len（只能通过 finish() 或空列表到达）
//! ```
//!
//! ## 设计原则
//!
//! - **全函数**：任何操作都不会失败。越界导航定义为空操作，
//!   越界查询返回 false/None。演出代码不需要每帧分支处理错误。
//! - **时间驱动**：显露量是累计时间的纯函数（线性、单调），
//!   与帧率无关；暂停/恢复不会让文字速度漂移。
//! - **单调显露**：同一条目内已显露的字符不会收回；
//!   [`skip_to_end`](DialogueSequencer::skip_to_end) 之后的
//!   `update` 不会回退显露量。

use serde::{Deserialize, Serialize};

use crate::command::Rgba;

/// 默认文字显露速度（字符/秒）
pub const DEFAULT_REVEAL_CPS: f32 = 50.0;

/// 一条可演出的文本单元
///
/// `speaker == None` 表示旁白。文本创建后不可变，由 Sequencer
/// 的条目列表独占持有。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueEntry {
    /// 说话者（None 表示旁白）
    pub speaker: Option<String>,
    /// 完整文本
    pub text: String,
    /// 表情标签
    pub emotion: String,
    /// 显示颜色
    pub color: Rgba,
}

impl DialogueEntry {
    /// 创建对话条目（默认表情 neutral、默认颜色）
    pub fn new(speaker: Option<String>, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            emotion: "neutral".to_string(),
            color: Rgba::WHITE,
        }
    }

    /// 创建旁白条目（无说话者，旁白颜色）
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
            emotion: "neutral".to_string(),
            color: Rgba::NARRATION,
        }
    }

    /// 设置表情标签
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }

    /// 设置显示颜色
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// 文本的 Unicode 字符数
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// 对话序列器
///
/// 条目列表在一次加载中填充、之后只读；游标与显露计时是仅有的
/// 可变量，全部由同一线程的 `update`/导航调用驱动。
#[derive(Debug, Clone)]
pub struct DialogueSequencer {
    /// 有序条目列表
    entries: Vec<DialogueEntry>,
    /// 当前条目下标（== entries.len() 表示结束）
    index: usize,
    /// 当前条目的累计显露时间（秒）
    elapsed: f32,
    /// 当前条目已显露的字符数
    revealed: usize,
    /// 显露速度（字符/秒）
    reveal_cps: f32,
}

impl DialogueSequencer {
    /// 创建空的序列器
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            elapsed: 0.0,
            revealed: 0,
            reveal_cps: DEFAULT_REVEAL_CPS,
        }
    }

    /// 追加一个条目
    pub fn add_entry(&mut self, entry: DialogueEntry) {
        self.entries.push(entry);
    }

    /// 追加一行（便捷方法，默认表情与颜色）
    pub fn add_line(&mut self, speaker: Option<String>, text: impl Into<String>) {
        self.add_entry(DialogueEntry::new(speaker, text));
    }

    /// 清空条目并重置游标
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
        self.reset_reveal();
    }

    /// 条目总数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 当前游标下标
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// 当前条目（结束后返回 None）
    pub fn current_entry(&self) -> Option<&DialogueEntry> {
        self.entries.get(self.index)
    }

    /// 当前显露速度（字符/秒）
    pub fn reveal_cps(&self) -> f32 {
        self.reveal_cps
    }

    /// 设置显露速度（字符/秒，负值按 0 处理）
    pub fn set_reveal_cps(&mut self, cps: f32) {
        self.reveal_cps = cps.max(0.0);
    }

    /// 推进显露计时
    ///
    /// `dt` 为本帧经过的秒数。当前条目已全部显露时什么都不做，
    /// 因此 [`skip_to_end`](Self::skip_to_end) 的效果不会被回退。
    pub fn update(&mut self, dt: f32) {
        let Some(entry) = self.entries.get(self.index) else {
            return;
        };

        let total = entry.char_len();
        if self.revealed >= total {
            return;
        }

        self.elapsed += dt;
        let shown = (self.elapsed * self.reveal_cps) as usize;
        self.revealed = shown.min(total);
    }

    /// 前进到下一条目
    ///
    /// 已经停在最后一个条目时是空操作——游标永远不会通过
    /// `advance` 越过列表末尾；到达"结束"状态需要显式调用
    /// [`finish`](Self::finish)。
    pub fn advance(&mut self) {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            self.reset_reveal();
        }
    }

    /// 回退到上一条目（下标 0 处为空操作）
    pub fn retreat(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.reset_reveal();
        }
    }

    /// 立即显露当前条目的全部文本（不改变游标）
    pub fn skip_to_end(&mut self) {
        if let Some(entry) = self.entries.get(self.index) {
            self.revealed = entry.char_len();
        }
    }

    /// 显式结束整个序列
    ///
    /// 将游标移到列表末尾之后，使 [`is_finished`](Self::is_finished)
    /// 返回 true。这是到达结束状态的唯一途径（除了列表本身为空）。
    pub fn finish(&mut self) {
        self.index = self.entries.len();
        self.reset_reveal();
    }

    /// 当前条目是否已全部显露（游标越界时返回 false）
    pub fn is_line_finished(&self) -> bool {
        self.entries
            .get(self.index)
            .map(|entry| self.revealed >= entry.char_len())
            .unwrap_or(false)
    }

    /// 整个序列是否已结束
    pub fn is_finished(&self) -> bool {
        self.index >= self.entries.len()
    }

    /// 当前已显露的字符数
    pub fn visible_chars(&self) -> usize {
        self.revealed
    }

    /// 当前已显露的文本切片
    pub fn visible_text(&self) -> &str {
        let Some(entry) = self.current_entry() else {
            return "";
        };
        match entry.text.char_indices().nth(self.revealed) {
            Some((byte_idx, _)) => &entry.text[..byte_idx],
            None => &entry.text,
        }
    }

    /// 重置显露状态（导航后调用）
    fn reset_reveal(&mut self) {
        self.elapsed = 0.0;
        self.revealed = 0;
    }
}

impl Default for DialogueSequencer {
    fn default() -> Self {
        Self::new()
    }
}

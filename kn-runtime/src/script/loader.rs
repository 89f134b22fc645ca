//! # Loader 模块
//!
//! 把整份脚本转换为"已执行的场景指令 + 填充好的 Sequencer"。
//!
//! ## 执行模型
//!
//! 逐行、按文件顺序处理：场景指令在加载到该行时**立即**派发给
//! [`Stage`]（不回溯、不重排——指令与对话在文件中的交错顺序是
//! 语义的一部分）；对话与旁白追加到 [`DialogueSequencer`]。
//!
//! ## 失败语义
//!
//! 唯一的失败是文件无法打开（[`ScriptError::FileOpen`]），此时
//! Sequencer 保持清空状态。其余一切输入都能加载成功，格式错误的
//! 行静默退化并记入 [`LoadReport`] 的诊断列表。

use std::fs;
use std::path::Path;

use crate::command::{Command, Position};
use crate::diagnostic::{Diagnostic, LoadReport};
use crate::error::{ScriptError, ScriptResult};
use crate::script::parser::parse_line;
use crate::sequencer::{DialogueEntry, DialogueSequencer};

/// 场景协作者接口
///
/// Parser 对演出层的全部要求：四个同步的、即发即忘的操作。
/// 宿主层负责把它们落到实际的渲染/音频状态上。
pub trait Stage {
    /// 切换当前背景
    fn set_background(&mut self, name: &str);

    /// 播放循环音乐
    fn play_music(&mut self, name: &str);

    /// 播放一次性音效
    fn play_sound(&mut self, name: &str);

    /// 在指定位置显示角色立绘
    fn show_character(&mut self, name: &str, emotion: &str, position: Position);
}

/// 加载一段脚本文本
///
/// 不做 IO；按行解析并立即执行/追加。返回的 [`LoadReport`] 记录
/// 统计信息和空操作行的诊断（空行不计入诊断——留白是排版手段，
/// 不是作者错误）。
pub fn load_script_str(
    source: &str,
    stage: &mut impl Stage,
    sequencer: &mut DialogueSequencer,
) -> LoadReport {
    let mut report = LoadReport::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_number = idx + 1;
        report.lines_total += 1;

        match parse_line(raw) {
            Command::SetBackground { name } => {
                stage.set_background(&name);
                report.commands_dispatched += 1;
            }
            Command::PlayMusic { name } => {
                stage.play_music(&name);
                report.commands_dispatched += 1;
            }
            Command::PlaySound { name } => {
                stage.play_sound(&name);
                report.commands_dispatched += 1;
            }
            Command::ShowCharacter {
                name,
                emotion,
                position,
            } => {
                stage.show_character(&name, &emotion, position);
                report.commands_dispatched += 1;
            }
            Command::Dialogue { speaker, text } => {
                // 空说话者按旁白式显示处理（没有名牌），但保留对话默认颜色
                let speaker = (!speaker.is_empty()).then_some(speaker);
                sequencer.add_entry(DialogueEntry::new(speaker, text));
                report.entries_added += 1;
            }
            Command::Narration { text } => {
                sequencer.add_entry(DialogueEntry::narration(text));
                report.entries_added += 1;
            }
            Command::Comment { .. } => {}
            Command::None => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    report.diagnostics.push(
                        Diagnostic::warn(line_number, "无法识别的行，已忽略")
                            .with_detail(trimmed),
                    );
                }
            }
        }
    }

    report
}

/// 加载脚本文件
///
/// 先清空 Sequencer，再读取文件。文件无法打开时返回
/// [`ScriptError::FileOpen`]，Sequencer 保持清空，调用方自行替换
/// 后备内容。
pub fn load_script_file(
    path: impl AsRef<Path>,
    stage: &mut impl Stage,
    sequencer: &mut DialogueSequencer,
) -> ScriptResult<LoadReport> {
    let path = path.as_ref();
    sequencer.clear();

    let source = fs::read_to_string(path).map_err(|source| ScriptError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(load_script_str(&source, stage, sequencer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// 记录调用顺序的 Stage 测试替身
    #[derive(Default)]
    struct RecordingStage {
        calls: Vec<String>,
    }

    impl Stage for RecordingStage {
        fn set_background(&mut self, name: &str) {
            self.calls.push(format!("bg:{name}"));
        }

        fn play_music(&mut self, name: &str) {
            self.calls.push(format!("music:{name}"));
        }

        fn play_sound(&mut self, name: &str) {
            self.calls.push(format!("sfx:{name}"));
        }

        fn show_character(&mut self, name: &str, emotion: &str, position: Position) {
            self.calls.push(format!("show:{name}:{emotion}:{position:?}"));
        }
    }

    const SCRIPT: &str = r#"# intro
@bg classroom
@music morning

"The bell had already rung."

Yuki happy left
Yuki: "Good morning!"

@sfx door
Sora neutral derecha
Sora: "Sorry I'm late."
"#;

    #[test]
    fn test_load_interleaves_commands_in_file_order() {
        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();

        let report = load_script_str(SCRIPT, &mut stage, &mut seq);

        assert_eq!(
            stage.calls,
            vec![
                "bg:classroom",
                "music:morning",
                "show:Yuki:happy:Left",
                "sfx:door",
                "show:Sora:neutral:Right",
            ]
        );
        assert_eq!(report.commands_dispatched, 5);
    }

    #[test]
    fn test_load_appends_entries_in_order() {
        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();

        let report = load_script_str(SCRIPT, &mut stage, &mut seq);

        assert_eq!(seq.len(), 3);
        assert_eq!(report.entries_added, 3);

        // 旁白：无说话者
        assert_eq!(seq.current_entry().unwrap().speaker, None);
        assert_eq!(
            seq.current_entry().unwrap().text,
            "The bell had already rung."
        );

        seq.advance();
        assert_eq!(seq.current_entry().unwrap().speaker.as_deref(), Some("Yuki"));

        seq.advance();
        assert_eq!(seq.current_entry().unwrap().text, "Sorry I'm late.");
    }

    #[test]
    fn test_load_reports_noop_lines() {
        let source = "@bg forest\n@@typo here\nYuki\n\n# comment\n";
        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();

        let report = load_script_str(source, &mut stage, &mut seq);

        // `@@typo here` 是未知指令、`Yuki` 只有一个 token；
        // 空行和注释不计入诊断
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[0].line, 2);
        assert_eq!(report.diagnostics[0].detail.as_deref(), Some("@@typo here"));
        assert_eq!(report.diagnostics[1].line, 3);
        assert_eq!(report.lines_total, 5);
    }

    #[test]
    fn test_load_file_not_found_leaves_sequencer_cleared() {
        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();
        seq.add_entry(DialogueEntry::narration("stale"));

        let result = load_script_file("definitely/not/here.txt", &mut stage, &mut seq);

        assert!(matches!(result, Err(ScriptError::FileOpen { .. })));
        assert_eq!(seq.len(), 0);
        assert!(stage.calls.is_empty());
    }

    #[test]
    fn test_load_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "@bg beach\n\"Waves.\"\n").unwrap();

        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();

        let report = load_script_file(file.path(), &mut stage, &mut seq).unwrap();

        assert_eq!(stage.calls, vec!["bg:beach"]);
        assert_eq!(seq.len(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_load_file_clears_previous_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\"Fresh start.\"\n").unwrap();

        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();
        seq.add_entry(DialogueEntry::narration("old one"));
        seq.add_entry(DialogueEntry::narration("old two"));

        load_script_file(file.path(), &mut stage, &mut seq).unwrap();

        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_entry().unwrap().text, "Fresh start.");
    }

    #[test]
    fn test_empty_dialogue_speaker_becomes_narration_style() {
        let mut stage = RecordingStage::default();
        let mut seq = DialogueSequencer::new();

        load_script_str(": \"who said that\"", &mut stage, &mut seq);

        assert_eq!(seq.len(), 1);
        let entry = seq.current_entry().unwrap();
        assert_eq!(entry.speaker, None);
        // 对话默认颜色保持不变（与真正的旁白区分）
        assert_eq!(entry.color, crate::command::Rgba::WHITE);
    }
}

//! # Parser 模块
//!
//! 逐行脚本解析器（手写字符串扫描，无 regex 依赖）。
//!
//! ## 语法
//!
//! 对 trim 后的行按固定优先级匹配：
//!
//! ```text
//! (空行)                     -> None
//! # 注释                     -> Comment
//! @bg forest                 -> SetBackground
//! @music theme               -> PlayMusic
//! @sfx door                  -> PlaySound
//! "旁白文本"                  -> Narration
//! Yuki: "对话文本"            -> Dialogue
//! Yuki happy left            -> ShowCharacter
//! (其余)                     -> None
//! ```
//!
//! ## 设计原则
//!
//! - **宽容解析**：任何无法识别的行退化为 [`Command::None`]，
//!   绝不报错、绝不中断加载。作者通过运行画面发现脚本错误，
//!   而不是通过解析器诊断（诊断通道只做补充告警）。
//! - **纯函数**：[`parse_line`] 不做 IO、不持有状态、不会失败。

use crate::command::{Command, Position};

/// 解析一行脚本
///
/// 纯函数，永不失败：格式错误的输入映射为 [`Command::None`]。
pub fn parse_line(raw: &str) -> Command {
    let trimmed = raw.trim();

    // 空行
    if trimmed.is_empty() {
        return Command::None;
    }

    // 注释：# 之后的内容原样保留
    if let Some(rest) = trimmed.strip_prefix('#') {
        return Command::Comment {
            text: rest.to_string(),
        };
    }

    // @ 指令（background / music / sfx）
    if let Some(rest) = trimmed.strip_prefix('@') {
        return parse_directive(rest);
    }

    // 旁白：引号开头
    if trimmed.starts_with('"') {
        return Command::Narration {
            text: quoted_span(trimmed).to_string(),
        };
    }

    // 对话：Name: "text"
    if let Some((before, after)) = trimmed.split_once(':') {
        let after = after.trim();
        if after.starts_with('"') {
            return Command::Dialogue {
                speaker: before.trim().to_string(),
                text: quoted_span(after).to_string(),
            };
        }
        // 冒号后没有引号：不是对话，落入角色指令解析
    }

    // 角色指令：Name emotion [position]
    let mut tokens = trimmed.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(name), Some(emotion)) => Command::ShowCharacter {
            name: name.to_string(),
            emotion: emotion.to_string(),
            position: tokens
                .next()
                .map(Position::parse_or_center)
                .unwrap_or(Position::Center),
        },
        _ => Command::None,
    }
}

/// 解析 `@` 指令（入参不含 `@`）
///
/// 在第一个空白字符处切分为指令名和参数；指令名不区分大小写。
/// 没有空白或指令名无法识别时返回 [`Command::None`]
/// （未知指令静默忽略，保证脚本格式的向前兼容）。
fn parse_directive(rest: &str) -> Command {
    let Some(split_at) = rest.find(char::is_whitespace) else {
        return Command::None;
    };

    let command = rest[..split_at].to_lowercase();
    let value = rest[split_at..].trim().to_string();

    match command.as_str() {
        "bg" | "background" => Command::SetBackground { name: value },
        "music" => Command::PlayMusic { name: value },
        "sfx" | "sound" => Command::PlaySound { name: value },
        _ => Command::None,
    }
}

/// 提取首字符与**最后一个**引号之间的内容
///
/// 入参以 `"` 开头。使用最后一个引号而不是第一个闭合引号，
/// 因此一行只支持一个引用片段，但容忍闭合引号后的尾随文本。
/// 行内只有一个引号时返回空串。
fn quoted_span(s: &str) -> &str {
    match s.rfind('"') {
        Some(idx) if idx > 0 => &s[1..idx],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------------
    // 空行与注释
    // ---------------------------------------------------------------------

    #[test]
    fn test_blank_line_is_none() {
        assert_eq!(parse_line(""), Command::None);
        assert_eq!(parse_line("   "), Command::None);
        assert_eq!(parse_line("\t"), Command::None);
    }

    #[test]
    fn test_comment_keeps_payload() {
        assert_eq!(
            parse_line("# capítulo 0"),
            Command::Comment {
                text: " capítulo 0".to_string()
            }
        );
        // 内容不 trim，原样保留
        assert_eq!(
            parse_line("#inline"),
            Command::Comment {
                text: "inline".to_string()
            }
        );
    }

    // ---------------------------------------------------------------------
    // @ 指令
    // ---------------------------------------------------------------------

    #[test]
    fn test_directive_background() {
        let expected = Command::SetBackground {
            name: "forest".to_string(),
        };
        assert_eq!(parse_line("@bg forest"), expected);
        assert_eq!(parse_line("@background forest"), expected);
        // 指令名不区分大小写
        assert_eq!(parse_line("@BG forest"), expected);
        assert_eq!(parse_line("@Background forest"), expected);
    }

    #[test]
    fn test_directive_music_and_sound() {
        assert_eq!(
            parse_line("@music theme"),
            Command::PlayMusic {
                name: "theme".to_string()
            }
        );
        assert_eq!(
            parse_line("@sfx door"),
            Command::PlaySound {
                name: "door".to_string()
            }
        );
        assert_eq!(
            parse_line("@sound door"),
            Command::PlaySound {
                name: "door".to_string()
            }
        );
    }

    #[test]
    fn test_directive_value_is_trimmed() {
        assert_eq!(
            parse_line("@bg   classroom  "),
            Command::SetBackground {
                name: "classroom".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_directive_is_none() {
        assert_eq!(parse_line("@wait 2"), Command::None);
        assert_eq!(parse_line("@fadeout music"), Command::None);
    }

    #[test]
    fn test_directive_without_value_is_none() {
        // 没有空白分隔，无法切分出参数
        assert_eq!(parse_line("@bg"), Command::None);
        assert_eq!(parse_line("@music"), Command::None);
    }

    // ---------------------------------------------------------------------
    // 旁白
    // ---------------------------------------------------------------------

    #[test]
    fn test_narration_basic() {
        assert_eq!(
            parse_line("\"Hello there\""),
            Command::Narration {
                text: "Hello there".to_string()
            }
        );
    }

    #[test]
    fn test_narration_tolerates_trailing_text() {
        // 使用最后一个引号：闭合引号后的尾随文本被丢弃
        assert_eq!(
            parse_line("\"The rain stopped.\" trailing note"),
            Command::Narration {
                text: "The rain stopped.".to_string()
            }
        );
    }

    #[test]
    fn test_narration_multiple_quoted_fragments_merge() {
        // 一行只支持一个引用片段：中间的引号被并入文本
        assert_eq!(
            parse_line("\"uno\" y \"dos\""),
            Command::Narration {
                text: "uno\" y \"dos".to_string()
            }
        );
    }

    #[test]
    fn test_narration_lone_quote_is_empty() {
        assert_eq!(
            parse_line("\""),
            Command::Narration {
                text: String::new()
            }
        );
    }

    // ---------------------------------------------------------------------
    // 对话
    // ---------------------------------------------------------------------

    #[test]
    fn test_dialogue_basic() {
        assert_eq!(
            parse_line("Yuki: \"I brought cake.\""),
            Command::Dialogue {
                speaker: "Yuki".to_string(),
                text: "I brought cake.".to_string(),
            }
        );
    }

    #[test]
    fn test_dialogue_trims_speaker() {
        assert_eq!(
            parse_line("  Profesora Vega :  \"Siéntense, por favor.\""),
            Command::Dialogue {
                speaker: "Profesora Vega".to_string(),
                text: "Siéntense, por favor.".to_string(),
            }
        );
    }

    #[test]
    fn test_dialogue_splits_at_first_colon() {
        assert_eq!(
            parse_line("Yuki: \"Time: 3 PM\""),
            Command::Dialogue {
                speaker: "Yuki".to_string(),
                text: "Time: 3 PM".to_string(),
            }
        );
    }

    #[test]
    fn test_colon_without_quote_falls_through() {
        // 冒号后没有引号：整行按空白切分为角色指令
        assert_eq!(
            parse_line("Hello: world"),
            Command::ShowCharacter {
                name: "Hello:".to_string(),
                emotion: "world".to_string(),
                position: Position::Center,
            }
        );
    }

    // ---------------------------------------------------------------------
    // 角色指令
    // ---------------------------------------------------------------------

    #[test]
    fn test_show_character_with_position() {
        assert_eq!(
            parse_line("Yuki happy left"),
            Command::ShowCharacter {
                name: "Yuki".to_string(),
                emotion: "happy".to_string(),
                position: Position::Left,
            }
        );
    }

    #[test]
    fn test_show_character_defaults_to_center() {
        assert_eq!(
            parse_line("Yuki happy"),
            Command::ShowCharacter {
                name: "Yuki".to_string(),
                emotion: "happy".to_string(),
                position: Position::Center,
            }
        );
    }

    #[test]
    fn test_show_character_spanish_position() {
        assert_eq!(
            parse_line("Sora triste derecha"),
            Command::ShowCharacter {
                name: "Sora".to_string(),
                emotion: "triste".to_string(),
                position: Position::Right,
            }
        );
    }

    #[test]
    fn test_show_character_unknown_position_is_center() {
        assert_eq!(
            parse_line("Yuki happy upstage"),
            Command::ShowCharacter {
                name: "Yuki".to_string(),
                emotion: "happy".to_string(),
                position: Position::Center,
            }
        );
    }

    #[test]
    fn test_single_token_is_none() {
        assert_eq!(parse_line("Yuki"), Command::None);
        assert_eq!(parse_line("  lonely  "), Command::None);
    }

    #[test]
    fn test_leading_whitespace_is_trimmed() {
        assert_eq!(
            parse_line("   @bg forest"),
            Command::SetBackground {
                name: "forest".to_string()
            }
        );
    }
}

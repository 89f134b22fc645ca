//! # 资源路径模块
//!
//! 逻辑资源名 → 资源树内相对路径的纯映射。
//!
//! ## 资源树约定
//!
//! ```text
//! {assets_root}/
//!   backgrounds/{name}.png
//!   characters/{name}/{emotion}.png
//!   music/{name}.ogg | .mp3
//!   sfx/{name}.wav | .ogg
//!   fonts/{name}
//!   dialogues/{language}/{file}
//! ```
//!
//! 路径统一使用 `/` 分隔符；拼接 `assets_root` 在
//! [`ResourceManager`](super::ResourceManager) 中完成。

/// 背景图片路径
pub fn background_path(name: &str) -> String {
    format!("backgrounds/{name}.png")
}

/// 角色立绘路径（按角色名与表情定位）
pub fn character_sprite_path(name: &str, emotion: &str) -> String {
    format!("characters/{name}/{emotion}.png")
}

/// 音乐文件候选路径（按优先级排列：ogg 优先，mp3 兜底）
pub fn music_candidates(name: &str) -> [String; 2] {
    [format!("music/{name}.ogg"), format!("music/{name}.mp3")]
}

/// 音效文件候选路径（wav 优先，ogg 兜底）
pub fn sound_candidates(name: &str) -> [String; 2] {
    [format!("sfx/{name}.wav"), format!("sfx/{name}.ogg")]
}

/// 字体文件路径（文件名含扩展名）
pub fn font_path(name: &str) -> String {
    format!("fonts/{name}")
}

/// 对话脚本路径（按语言标签分目录）
pub fn dialogue_path(language: &str, file: &str) -> String {
    format!("dialogues/{language}/{file}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_path() {
        assert_eq!(background_path("forest"), "backgrounds/forest.png");
    }

    #[test]
    fn test_character_sprite_path() {
        assert_eq!(
            character_sprite_path("yuki", "happy"),
            "characters/yuki/happy.png"
        );
    }

    #[test]
    fn test_music_candidates_prefer_ogg() {
        assert_eq!(
            music_candidates("theme"),
            ["music/theme.ogg".to_string(), "music/theme.mp3".to_string()]
        );
    }

    #[test]
    fn test_sound_candidates_prefer_wav() {
        assert_eq!(
            sound_candidates("door"),
            ["sfx/door.wav".to_string(), "sfx/door.ogg".to_string()]
        );
    }

    #[test]
    fn test_dialogue_path_includes_language() {
        assert_eq!(
            dialogue_path("es-es", "ch0.txt"),
            "dialogues/es-es/ch0.txt"
        );
        assert_eq!(
            dialogue_path("en-us", "ch1.txt"),
            "dialogues/en-us/ch1.txt"
        );
    }

    #[test]
    fn test_font_path() {
        assert_eq!(font_path("GenJyuuGothicX-Bold.ttf"), "fonts/GenJyuuGothicX-Bold.ttf");
    }
}

//! # Scene 模块
//!
//! 舞台状态：当前背景与角色立绘槽位。
//!
//! ## 设计说明
//!
//! - 加载脚本时，场景指令通过 [`SceneDirector`]（[`Stage`] 的实现）
//!   落到这里；`SceneState` 只记录"要演什么"
//! - 纹理在绘制前经 [`ResourceManager`] 惰性解析（每个资源只
//!   尝试加载一次，缺失则告警并跳过）
//! - 绘制顺序：背景 → 左 → 中 → 右 → 显式坐标

pub mod character;

pub use character::CharacterSlot;

use kn_runtime::{Position, Stage};
use macroquad::prelude::*;
use std::collections::HashMap;
use tracing::info;

use crate::audio::AudioManager;
use crate::resources::ResourceManager;

/// 角色绘制顺序（舞台锚点）
const DRAW_ORDER: [Position; 3] = [Position::Left, Position::Center, Position::Right];

/// 舞台状态
#[derive(Debug, Default)]
pub struct SceneState {
    /// 当前背景逻辑名
    background_name: Option<String>,
    /// 已解析的背景纹理
    background: Option<Texture2D>,
    /// 背景加载是否失败（避免每帧重试）
    background_failed: bool,
    /// 角色槽位（角色名 -> 状态）
    characters: HashMap<String, CharacterSlot>,
}

impl SceneState {
    /// 创建空舞台
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换背景（同名时不做任何事）
    pub fn set_background(&mut self, name: &str) {
        if self.background_name.as_deref() == Some(name) {
            return;
        }
        self.background_name = Some(name.to_string());
        self.background = None;
        self.background_failed = false;
    }

    /// 当前背景逻辑名
    pub fn background_name(&self) -> Option<&str> {
        self.background_name.as_deref()
    }

    /// 显示角色（不存在时创建槽位）
    pub fn show_character(&mut self, name: &str, emotion: &str, position: Position) {
        let slot = self
            .characters
            .entry(name.to_string())
            .or_insert_with(|| CharacterSlot::new(emotion, position));
        slot.set_emotion(emotion);
        slot.set_position(position);
        slot.show();
    }

    /// 隐藏角色（未知角色名为空操作）
    pub fn hide_character(&mut self, name: &str) {
        if let Some(slot) = self.characters.get_mut(name) {
            slot.hide();
        }
    }

    /// 隐藏所有角色
    pub fn clear_characters(&mut self) {
        for slot in self.characters.values_mut() {
            slot.hide();
        }
    }

    /// 按显式坐标放置角色（不存在时创建槽位）
    pub fn place_character(&mut self, name: &str, x: f32, y: f32) {
        let slot = self
            .characters
            .entry(name.to_string())
            .or_insert_with(|| CharacterSlot::new("neutral", Position::Offscreen));
        slot.place_at(x, y);
        slot.show();
    }

    /// 访问角色槽位
    pub fn character(&self, name: &str) -> Option<&CharacterSlot> {
        self.characters.get(name)
    }

    /// 当前可见的角色数
    pub fn visible_characters(&self) -> usize {
        self.characters.values().filter(|s| s.visible).count()
    }

    /// 解析待加载的纹理（背景与可见角色，各资源只尝试一次）
    pub async fn ensure_textures(&mut self, resources: &mut ResourceManager) {
        if let Some(name) = self.background_name.clone()
            && self.background.is_none()
            && !self.background_failed
        {
            match resources.background(&name).await {
                Some(texture) => self.background = Some(texture),
                None => self.background_failed = true,
            }
        }

        for (name, slot) in self.characters.iter_mut() {
            if slot.visible && slot.texture.is_none() && !slot.load_failed {
                match resources.character_sprite(name, &slot.emotion).await {
                    Some(texture) => slot.texture = Some(texture),
                    None => slot.load_failed = true,
                }
            }
        }
    }

    /// 绘制舞台（背景 + 角色）
    pub fn draw(&self, screen_w: f32, screen_h: f32) {
        self.draw_background(screen_w, screen_h);
        self.draw_characters(screen_w, screen_h);
    }

    /// 绘制背景：等比放大到铺满屏幕并居中
    fn draw_background(&self, screen_w: f32, screen_h: f32) {
        let Some(texture) = &self.background else {
            return;
        };

        let scale_x = screen_w / texture.width();
        let scale_y = screen_h / texture.height();
        let scale = scale_x.max(scale_y);

        let dest_w = texture.width() * scale;
        let dest_h = texture.height() * scale;

        let x = if dest_w > screen_w {
            -(dest_w - screen_w) / 2.0
        } else {
            0.0
        };
        let y = if dest_h > screen_h {
            -(dest_h - screen_h) / 2.0
        } else {
            0.0
        };

        draw_texture_ex(
            texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest_w, dest_h)),
                ..Default::default()
            },
        );
    }

    /// 按固定顺序绘制角色：左 → 中 → 右 → 显式坐标
    fn draw_characters(&self, screen_w: f32, screen_h: f32) {
        for position in DRAW_ORDER {
            for slot in self.characters.values() {
                if slot.position == position {
                    slot.draw(screen_w, screen_h);
                }
            }
        }
        for slot in self.characters.values() {
            if slot.position == Position::Offscreen {
                slot.draw(screen_w, screen_h);
            }
        }
    }
}

/// 场景指挥
///
/// 把核心层的 [`Stage`] 接口落到舞台状态与音频管理器上。
/// 生命周期只覆盖一次脚本加载，借用即用即还。
pub struct SceneDirector<'a> {
    /// 舞台状态
    pub scene: &'a mut SceneState,
    /// 音频管理器（无音频设备时为 None，静音运行）
    pub audio: Option<&'a mut AudioManager>,
    /// 资源管理器（路径解析）
    pub resources: &'a ResourceManager,
}

impl Stage for SceneDirector<'_> {
    fn set_background(&mut self, name: &str) {
        info!("背景切换: {name}");
        self.scene.set_background(name);
    }

    fn play_music(&mut self, name: &str) {
        if let Some(audio) = self.audio.as_deref_mut()
            && let Some(path) = self.resources.music_file(name)
        {
            audio.play_music(&path, true);
        }
    }

    fn play_sound(&mut self, name: &str) {
        if let Some(audio) = self.audio.as_deref_mut()
            && let Some(path) = self.resources.sound_file(name)
        {
            audio.play_sound(&path);
        }
    }

    fn show_character(&mut self, name: &str, emotion: &str, position: Position) {
        info!("角色上场: {name} ({emotion}) @ {position:?}");
        self.scene.show_character(name, emotion, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_background_ignores_same_name() {
        let mut scene = SceneState::new();
        scene.set_background("forest");
        scene.background_failed = true;

        // 同名：不重置失败标记
        scene.set_background("forest");
        assert!(scene.background_failed);

        // 换名：重置
        scene.set_background("beach");
        assert!(!scene.background_failed);
        assert_eq!(scene.background_name(), Some("beach"));
    }

    #[test]
    fn test_show_character_upserts_slot() {
        let mut scene = SceneState::new();
        scene.show_character("yuki", "happy", Position::Left);

        let slot = scene.character("yuki").unwrap();
        assert!(slot.visible);
        assert_eq!(slot.emotion, "happy");
        assert_eq!(slot.position, Position::Left);

        // 同一角色再次上场：更新而不是新建
        scene.show_character("yuki", "sad", Position::Right);
        let slot = scene.character("yuki").unwrap();
        assert_eq!(slot.emotion, "sad");
        assert_eq!(slot.position, Position::Right);
        assert_eq!(scene.visible_characters(), 1);
    }

    #[test]
    fn test_hide_and_clear_characters() {
        let mut scene = SceneState::new();
        scene.show_character("yuki", "happy", Position::Left);
        scene.show_character("sora", "neutral", Position::Right);
        assert_eq!(scene.visible_characters(), 2);

        scene.hide_character("yuki");
        assert_eq!(scene.visible_characters(), 1);

        // 未知角色名是空操作
        scene.hide_character("nobody");

        scene.clear_characters();
        assert_eq!(scene.visible_characters(), 0);
    }

    #[test]
    fn test_place_character_offscreen() {
        let mut scene = SceneState::new();
        scene.place_character("yuki", -300.0, 100.0);

        let slot = scene.character("yuki").unwrap();
        assert_eq!(slot.position, Position::Offscreen);
        assert_eq!(slot.coords, Some((-300.0, 100.0)));
    }

    #[test]
    fn test_scene_director_updates_scene() {
        let mut scene = SceneState::new();
        let resources = ResourceManager::new("assets", "en-us");
        let mut director = SceneDirector {
            scene: &mut scene,
            audio: None,
            resources: &resources,
        };

        Stage::set_background(&mut director, "classroom");
        Stage::show_character(&mut director, "yuki", "happy", Position::Center);
        // 无音频设备：音乐/音效指令静默跳过
        Stage::play_music(&mut director, "theme");
        Stage::play_sound(&mut director, "door");

        assert_eq!(scene.background_name(), Some("classroom"));
        assert!(scene.character("yuki").unwrap().visible);
    }
}

//! 角色立绘槽位与舞台布局。

use kn_runtime::Position;
use macroquad::prelude::*;

/// 立绘最大高度占屏幕高度的比例
const MAX_HEIGHT_RATIO: f32 = 0.85;

/// 三个舞台锚点的横向位置（屏幕宽度比例）
fn anchor_ratio(position: Position) -> f32 {
    match position {
        Position::Left => 0.15,
        Position::Center => 0.5,
        Position::Right => 0.85,
        // Offscreen 不使用锚点布局
        Position::Offscreen => 0.5,
    }
}

/// 一个角色的舞台状态
///
/// 纹理按 (角色名, 表情) 惰性解析；表情变化时使旧纹理失效。
/// 加载失败只尝试一次，之后跳过该槽位。
#[derive(Debug)]
pub struct CharacterSlot {
    /// 当前表情标签
    pub emotion: String,
    /// 舞台位置
    pub position: Position,
    /// 显式坐标（仅 `Offscreen` 位置使用）
    pub coords: Option<(f32, f32)>,
    /// 不透明度 (0.0 - 1.0)
    pub alpha: f32,
    /// 是否可见
    pub visible: bool,
    /// 已解析的立绘纹理
    pub(crate) texture: Option<Texture2D>,
    /// 上次加载是否失败（避免每帧重试）
    pub(crate) load_failed: bool,
}

impl CharacterSlot {
    /// 创建槽位
    pub fn new(emotion: impl Into<String>, position: Position) -> Self {
        Self {
            emotion: emotion.into(),
            position,
            coords: None,
            alpha: 1.0,
            visible: false,
            texture: None,
            load_failed: false,
        }
    }

    /// 切换表情（变化时使纹理失效）
    pub fn set_emotion(&mut self, emotion: &str) {
        if self.emotion != emotion {
            self.emotion = emotion.to_string();
            self.texture = None;
            self.load_failed = false;
        }
    }

    /// 设置舞台位置
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        if position != Position::Offscreen {
            self.coords = None;
        }
    }

    /// 按显式坐标放置（位置变为 `Offscreen`）
    pub fn place_at(&mut self, x: f32, y: f32) {
        self.position = Position::Offscreen;
        self.coords = Some((x, y));
    }

    /// 设置不透明度
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// 显示
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// 隐藏
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// 绘制立绘
    ///
    /// 锚点位置：底部对齐，超高时缩放到屏幕高度的 85% 以内；
    /// 显式坐标：原尺寸直接绘制。
    pub fn draw(&self, screen_w: f32, screen_h: f32) {
        if !self.visible {
            return;
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let tint = Color::new(1.0, 1.0, 1.0, self.alpha);

        if let (Position::Offscreen, Some((x, y))) = (self.position, self.coords) {
            draw_texture(texture, x, y, tint);
            return;
        }

        let mut width = texture.width();
        let mut height = texture.height();

        let max_height = screen_h * MAX_HEIGHT_RATIO;
        if height > max_height {
            let scale = max_height / height;
            width *= scale;
            height *= scale;
        }

        let x = screen_w * anchor_ratio(self.position) - width / 2.0;
        let y = screen_h - height;

        draw_texture_ex(
            texture,
            x,
            y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(width, height)),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_emotion_invalidates_texture_on_change() {
        let mut slot = CharacterSlot::new("neutral", Position::Center);
        slot.load_failed = true;

        slot.set_emotion("happy");
        assert_eq!(slot.emotion, "happy");
        assert!(!slot.load_failed);

        // 相同表情不重置失败标记
        slot.load_failed = true;
        slot.set_emotion("happy");
        assert!(slot.load_failed);
    }

    #[test]
    fn test_place_at_switches_to_offscreen() {
        let mut slot = CharacterSlot::new("neutral", Position::Left);
        slot.place_at(-200.0, 300.0);
        assert_eq!(slot.position, Position::Offscreen);
        assert_eq!(slot.coords, Some((-200.0, 300.0)));

        // 回到舞台锚点时清除坐标
        slot.set_position(Position::Right);
        assert_eq!(slot.coords, None);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut slot = CharacterSlot::new("neutral", Position::Center);
        slot.set_alpha(1.5);
        assert_eq!(slot.alpha, 1.0);
        slot.set_alpha(-0.5);
        assert_eq!(slot.alpha, 0.0);
    }

    #[test]
    fn test_anchor_ratios() {
        assert_eq!(anchor_ratio(Position::Left), 0.15);
        assert_eq!(anchor_ratio(Position::Center), 0.5);
        assert_eq!(anchor_ratio(Position::Right), 0.85);
    }
}

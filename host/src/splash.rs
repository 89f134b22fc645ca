//! # Splash 模块
//!
//! 启动画面：居中展示一张图片，进度条在配置的时长内匀速填满，
//! 结束后进入对话模式。

use macroquad::prelude::*;
use std::path::Path;
use tracing::warn;

/// 进度条配色
const BAR_FRAME_COLOR: Color = Color::new(0.25, 0.25, 0.25, 1.0);
const BAR_BACK_COLOR: Color = Color::new(0.8, 0.8, 0.8, 1.0);
const BAR_FILL_COLOR: Color = Color::new(0.86, 0.08, 0.08, 1.0);

/// 启动画面
pub struct SplashScreen {
    /// 启动图片（缺失时只画进度条）
    texture: Option<Texture2D>,
    /// 已经过的时间（秒）
    elapsed: f32,
    /// 总时长（秒）
    total: f32,
    /// 进度 (0.0 - 1.0)
    progress: f32,
    /// 是否结束
    finished: bool,
    /// 是否显示进度条
    show_bar: bool,
}

impl SplashScreen {
    /// 加载启动画面（图片缺失时告警并继续）
    pub async fn load(image_path: &Path, duration: f32, show_bar: bool) -> Self {
        let texture = match load_texture(&image_path.to_string_lossy()).await {
            Ok(texture) => Some(texture),
            Err(err) => {
                warn!("启动图片缺失: {} ({err:?})", image_path.display());
                None
            }
        };

        Self {
            texture,
            elapsed: 0.0,
            total: duration.max(f32::EPSILON),
            progress: 0.0,
            finished: false,
            show_bar,
        }
    }

    /// 推进计时
    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.elapsed += dt;
        self.progress = self.elapsed / self.total;

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.finished = true;
        }
    }

    /// 是否结束
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 重置到起点
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.progress = 0.0;
        self.finished = false;
    }

    /// 绘制启动画面
    pub fn draw(&self) {
        clear_background(WHITE);

        let screen_w = screen_width();
        let screen_h = screen_height();

        // 图片等比缩放、居中
        if let Some(texture) = &self.texture {
            let tex_w = texture.width();
            let tex_h = texture.height();

            let max_w = screen_w * 0.85;
            let max_h = screen_h * 0.7;
            let mut scale = 1.0;
            if tex_w > max_w || tex_h > max_h {
                scale = (max_w / tex_w).min(max_h / tex_h);
            }

            let dest_w = tex_w * scale;
            let dest_h = tex_h * scale;
            draw_texture_ex(
                texture,
                (screen_w - dest_w) / 2.0,
                (screen_h - dest_h) / 2.0 - 40.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(dest_w, dest_h)),
                    ..Default::default()
                },
            );
        }

        // 进度条
        if self.show_bar {
            let bar_w = screen_w * 0.6;
            let bar_h = screen_h * 0.04;
            let bar_x = (screen_w - bar_w) / 2.0;
            let bar_y = screen_h - screen_h * 0.12;

            draw_rectangle(bar_x - 4.0, bar_y - 4.0, bar_w + 8.0, bar_h + 8.0, BAR_FRAME_COLOR);
            draw_rectangle(bar_x, bar_y, bar_w, bar_h, BAR_BACK_COLOR);

            let fill_w = bar_w * self.progress;
            if fill_w > 0.0 {
                draw_rectangle(bar_x, bar_y, fill_w, bar_h, BAR_FILL_COLOR);
            }
        }
    }
}

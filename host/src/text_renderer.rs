//! # TextRenderer 模块
//!
//! 对话框渲染：底部面板、说话者名牌、逐字显露的正文、
//! 行读完后的继续提示。

use macroquad::prelude::*;

/// 对话框配置
const DIALOGUE_BOX_MARGIN: f32 = 40.0;
const DIALOGUE_BOX_HEIGHT: f32 = 200.0;
const DIALOGUE_BOX_PADDING: f32 = 20.0;

/// 文本配置
const SPEAKER_FONT_SIZE: f32 = 28.0;
const CONTENT_FONT_SIZE: f32 = 24.0;
const HINT_FONT_SIZE: f32 = 16.0;

/// 颜色配置
const DIALOGUE_BOX_COLOR: Color = Color::new(0.05, 0.05, 0.08, 0.85);
const BORDER_COLOR: Color = Color::new(0.45, 0.45, 0.55, 0.8);
const NAME_TAG_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
const SPEAKER_NAME_COLOR: Color = Color::new(0.95, 0.85, 0.6, 1.0);
const HINT_COLOR: Color = Color::new(0.7, 0.7, 0.7, 1.0);

/// 对话框渲染器
#[derive(Debug, Default)]
pub struct DialogueRenderer {
    /// 自定义字体（用于非 ASCII 文本）
    font: Option<Font>,
}

impl DialogueRenderer {
    /// 创建渲染器（使用内置字体）
    pub fn new() -> Self {
        Self { font: None }
    }

    /// 加载自定义字体，失败时告警并继续使用内置字体
    pub async fn load_font(&mut self, path: &std::path::Path) {
        match load_ttf_font(&path.to_string_lossy()).await {
            Ok(font) => {
                tracing::info!("已加载字体: {}", path.display());
                self.font = Some(font);
            }
            Err(err) => {
                tracing::warn!("字体缺失: {} ({err:?})", path.display());
            }
        }
    }

    /// 是否使用自定义字体
    pub fn has_custom_font(&self) -> bool {
        self.font.is_some()
    }

    /// 渲染对话框
    ///
    /// # 参数
    /// - `speaker`: 说话者名称（None 表示旁白，不画名牌）
    /// - `content`: 完整文本
    /// - `visible_chars`: 当前显露的字符数（打字机效果）
    /// - `color`: 正文颜色
    pub fn draw_dialogue_box(
        &self,
        speaker: Option<&str>,
        content: &str,
        visible_chars: usize,
        color: Color,
    ) {
        let screen_w = screen_width();
        let screen_h = screen_height();

        let box_x = DIALOGUE_BOX_MARGIN;
        let box_y = screen_h - DIALOGUE_BOX_HEIGHT - DIALOGUE_BOX_MARGIN;
        let box_w = screen_w - DIALOGUE_BOX_MARGIN * 2.0;
        let box_h = DIALOGUE_BOX_HEIGHT;

        // 面板背景与边框
        draw_rectangle(box_x, box_y, box_w, box_h, DIALOGUE_BOX_COLOR);
        draw_rectangle_lines(box_x, box_y, box_w, box_h, 2.0, BORDER_COLOR);

        // 说话者名牌
        let mut text_y = box_y + DIALOGUE_BOX_PADDING;
        if let Some(name) = speaker {
            let name_size = self.measure(name, SPEAKER_FONT_SIZE);
            let tag_x = box_x + DIALOGUE_BOX_PADDING - 10.0;
            let tag_y = text_y - 5.0;
            let tag_w = name_size.width + 30.0;
            let tag_h = SPEAKER_FONT_SIZE + 12.0;

            draw_rectangle(tag_x, tag_y, tag_w, tag_h, NAME_TAG_COLOR);
            draw_rectangle_lines(tag_x, tag_y, tag_w, tag_h, 2.0, SPEAKER_NAME_COLOR);
            self.draw_text(
                name,
                box_x + DIALOGUE_BOX_PADDING + 5.0,
                text_y + SPEAKER_FONT_SIZE - 5.0,
                SPEAKER_FONT_SIZE,
                SPEAKER_NAME_COLOR,
            );
            text_y += tag_h + 10.0;
        }

        // 正文（打字机效果：只画前 visible_chars 个字符）
        let visible: String = content.chars().take(visible_chars).collect();
        let content_x = box_x + DIALOGUE_BOX_PADDING;
        let content_y = text_y + CONTENT_FONT_SIZE + 5.0;
        let max_width = box_w - DIALOGUE_BOX_PADDING * 2.0;

        self.draw_text_wrapped(&visible, content_x, content_y, CONTENT_FONT_SIZE, color, max_width);

        // 行读完后的继续提示
        if visible_chars >= content.chars().count() {
            self.draw_continue_indicator(box_x + box_w - 40.0, box_y + box_h - 30.0);
        }
    }

    /// 绘制屏幕顶部的操作提示
    pub fn draw_hint_bar(&self, text: &str) {
        self.draw_text(text, 10.0, 10.0 + HINT_FONT_SIZE, HINT_FONT_SIZE, HINT_COLOR);
    }

    /// 绘制调试信息（行进度）
    pub fn draw_progress(&self, current: usize, total: usize) {
        let text = format!("Line: {}/{}", current + 1, total);
        self.draw_debug_text(&text, 0);
    }

    /// 绘制一行调试文本（`row` 为从 0 开始的行号）
    pub fn draw_debug_text(&self, text: &str, row: usize) {
        let y = 40.0 + (HINT_FONT_SIZE + 6.0) * row as f32;
        self.draw_text(text, 10.0, y + HINT_FONT_SIZE, HINT_FONT_SIZE, SPEAKER_NAME_COLOR);
    }

    /// 绘制文本（自定义字体或内置字体）
    fn draw_text(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        if let Some(font) = &self.font {
            let params = TextParams {
                font: Some(font),
                font_size: font_size as u16,
                color,
                ..Default::default()
            };
            draw_text_ex(text, x, y, params);
        } else {
            // 内置字体（仅支持 ASCII）
            macroquad::prelude::draw_text(text, x, y, font_size, color);
        }
    }

    /// 绘制自动换行文本（按字符宽度折行，支持 `\n`）
    fn draw_text_wrapped(
        &self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
        max_width: f32,
    ) {
        let line_height = font_size * 1.4;
        let mut current_y = y;
        let mut current_line = String::new();
        let mut current_width = 0.0;

        for ch in text.chars() {
            if ch == '\n' {
                self.draw_text(&current_line, x, current_y, font_size, color);
                current_y += line_height;
                current_line.clear();
                current_width = 0.0;
                continue;
            }

            let char_width = self.measure(&ch.to_string(), font_size).width;

            if current_width + char_width > max_width && !current_line.is_empty() {
                self.draw_text(&current_line, x, current_y, font_size, color);
                current_y += line_height;
                current_line.clear();
                current_width = 0.0;
            }

            current_line.push(ch);
            current_width += char_width;
        }

        if !current_line.is_empty() {
            self.draw_text(&current_line, x, current_y, font_size, color);
        }
    }

    /// 测量文本尺寸
    fn measure(&self, text: &str, font_size: f32) -> TextDimensions {
        if let Some(font) = &self.font {
            measure_text(text, Some(font), font_size as u16, 1.0)
        } else {
            measure_text(text, None, font_size as u16, 1.0)
        }
    }

    /// 绘制继续提示（闪烁的三角形）
    fn draw_continue_indicator(&self, x: f32, y: f32) {
        let blink = ((get_time() * 5.0).sin() * 0.5 + 0.5) as f32;
        let color = Color::new(1.0, 1.0, 0.4, 0.4 + blink * 0.6);

        draw_triangle(
            vec2(x, y),
            vec2(x + 15.0, y + 10.0),
            vec2(x, y + 20.0),
            color,
        );
    }
}

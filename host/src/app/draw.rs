//! 每帧绘制逻辑。

use kn_runtime::Rgba;
use macroquad::prelude::*;

use super::{AppMode, AppState};

/// 操作提示
const HINT_TEXT: &str =
    "SPACE/CLICK: next | BACKSPACE/RIGHT-CLICK: back | CTRL: fast-forward | ESC: quit";

/// 每帧绘制
pub async fn draw(state: &mut AppState) {
    match state.mode {
        AppMode::Splash => state.splash.draw(),
        AppMode::Dialogue => {
            // 先解析本帧需要的纹理，再绘制
            state.scene.ensure_textures(&mut state.resources).await;

            clear_background(BLACK);

            let screen_w = screen_width();
            let screen_h = screen_height();
            state.scene.draw(screen_w, screen_h);

            if let Some(entry) = state.sequencer.current_entry() {
                state.dialogue_renderer.draw_dialogue_box(
                    entry.speaker.as_deref(),
                    &entry.text,
                    state.sequencer.visible_chars(),
                    to_color(entry.color),
                );
            }

            state.dialogue_renderer.draw_hint_bar(HINT_TEXT);

            if state.debug_overlay {
                state
                    .dialogue_renderer
                    .draw_progress(state.sequencer.current_index(), state.sequencer.len());
                state.dialogue_renderer.draw_debug_text(
                    &format!("Textures: {}", state.resources.texture_stats()),
                    1,
                );
                state.dialogue_renderer.draw_debug_text(
                    &format!("Characters on stage: {}", state.scene.visible_characters()),
                    2,
                );
            }
        }
        AppMode::Exit => {}
    }
}

/// 核心层颜色 → macroquad 颜色
fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

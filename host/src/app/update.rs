//! 每帧更新逻辑：输入处理与状态推进。

use macroquad::prelude::*;
use tracing::info;

use super::{AppMode, AppState};

/// 每帧更新
pub fn update(state: &mut AppState) {
    let dt = get_frame_time();

    // 全局按键
    if is_key_pressed(KeyCode::F1) {
        state.debug_overlay = !state.debug_overlay;
    }
    if is_key_pressed(KeyCode::Escape) {
        state.mode = AppMode::Exit;
        return;
    }

    match state.mode {
        AppMode::Splash => {
            state.splash.update(dt);
            if state.splash.is_finished() {
                info!("启动画面结束，进入演出");
                state.mode = AppMode::Dialogue;
                state.load_script();
            }
        }
        AppMode::Dialogue => update_dialogue(state, dt),
        AppMode::Exit => {}
    }
}

/// 对话模式的更新
fn update_dialogue(state: &mut AppState, dt: f32) {
    state.sequencer.update(dt);

    // 前进：行未读完先显示全文，读完才翻页；
    // 在最后一行上翻页触发显式的结束转换
    if is_key_pressed(KeyCode::Space) || is_mouse_button_pressed(MouseButton::Left) {
        if state.sequencer.is_line_finished() {
            if state.sequencer.current_index() + 1 >= state.sequencer.len() {
                state.sequencer.finish();
            } else {
                state.sequencer.advance();
            }
        } else {
            state.sequencer.skip_to_end();
        }
    }

    // 回退
    if is_key_pressed(KeyCode::Backspace) || is_mouse_button_pressed(MouseButton::Right) {
        state.sequencer.retreat();
    }

    // 快进（按住 Ctrl：行一读完就翻页，停在最后一行）
    if (is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl))
        && state.sequencer.is_line_finished()
    {
        state.sequencer.advance();
    }

    if state.sequencer.is_finished() {
        info!("演出结束");
        state.mode = AppMode::Exit;
    }
}

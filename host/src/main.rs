//! 入口：读取配置、创建窗口、驱动主循环。

use std::sync::OnceLock;

use clap::Parser;
use macroquad::prelude::*;
use tracing::info;

use host::app::{self, AppMode, AppState};
use host::config::{AppConfig, CliArgs};

/// 窗口配置在 macroquad 启动前计算，结果缓存给 main 使用
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

fn window_conf() -> Conf {
    tracing_subscriber::fmt().with_target(false).init();

    let args = CliArgs::parse();
    let config = AppConfig::load_or_default(&args.config).apply_cli(&args);

    let conf = Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        fullscreen: config.window.fullscreen,
        window_resizable: true,
        ..Default::default()
    };

    let _ = CONFIG.set(config);
    conf
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = CONFIG.get().cloned().unwrap_or_default();
    info!(
        "启动: {} {}x{}, 语言 {}",
        config.window.title, config.window.width, config.window.height, config.language,
    );

    let mut state = AppState::new(config).await;

    loop {
        app::update(&mut state);
        if state.mode == AppMode::Exit {
            break;
        }

        app::draw(&mut state).await;
        next_frame().await;
    }

    info!("退出");
}

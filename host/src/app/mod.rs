//! # App 模块
//!
//! 应用状态与主循环逻辑。
//!
//! ## 模块结构
//!
//! - `update`: 每帧输入处理与状态推进
//! - `draw`: 每帧绘制

pub mod draw;
pub mod update;

pub use draw::draw;
pub use update::update;

use kn_runtime::{DialogueEntry, DialogueSequencer, load_script_file};
use tracing::{error, info, warn};

use crate::audio::AudioManager;
use crate::config::AppConfig;
use crate::resources::ResourceManager;
use crate::scene::{SceneDirector, SceneState};
use crate::splash::SplashScreen;
use crate::text_renderer::DialogueRenderer;

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// 启动画面
    Splash,
    /// 对话演出
    Dialogue,
    /// 退出
    Exit,
}

/// 应用状态
pub struct AppState {
    /// 应用配置
    pub config: AppConfig,
    /// 资源管理器
    pub resources: ResourceManager,
    /// 舞台状态
    pub scene: SceneState,
    /// 音频管理器（无音频设备时为 None，静音运行）
    pub audio: Option<AudioManager>,
    /// 对话序列器
    pub sequencer: DialogueSequencer,
    /// 对话框渲染器
    pub dialogue_renderer: DialogueRenderer,
    /// 启动画面
    pub splash: SplashScreen,
    /// 当前模式
    pub mode: AppMode,
    /// 调试叠加层开关（F1 切换）
    pub debug_overlay: bool,
}

impl AppState {
    /// 初始化应用状态（加载字体与启动图片）
    pub async fn new(config: AppConfig) -> Self {
        let resources = ResourceManager::new(config.assets_root.clone(), config.language.clone());

        let audio = match AudioManager::new() {
            Ok(mut audio) => {
                audio.set_music_volume(config.audio.music_volume);
                audio.set_sound_volume(config.audio.sound_volume);
                Some(audio)
            }
            Err(err) => {
                warn!("{err}，将静音运行");
                None
            }
        };

        let mut sequencer = DialogueSequencer::new();
        sequencer.set_reveal_cps(config.text.reveal_cps);

        let mut dialogue_renderer = DialogueRenderer::new();
        if let Some(font) = &config.text.font {
            dialogue_renderer.load_font(&resources.font_file(font)).await;
        }

        let splash = SplashScreen::load(
            &resources.resolve(&config.splash.image),
            config.splash.duration,
            config.splash.show_bar,
        )
        .await;

        let debug_overlay = config.debug_overlay;

        Self {
            config,
            resources,
            scene: SceneState::new(),
            audio,
            sequencer,
            dialogue_renderer,
            splash,
            mode: AppMode::Splash,
            debug_overlay,
        }
    }

    /// 加载启动脚本
    ///
    /// 场景指令在加载过程中立即落到舞台/音频上。加载失败时塞入
    /// 后备台词，让玩家在画面里看到出错原因，程序继续运行。
    pub fn load_script(&mut self) {
        let path = self.resources.dialogue_file(&self.config.start_script);

        let mut director = SceneDirector {
            scene: &mut self.scene,
            audio: self.audio.as_mut(),
            resources: &self.resources,
        };

        match load_script_file(&path, &mut director, &mut self.sequencer) {
            Ok(report) => {
                info!(
                    "脚本已加载: {} ({} 条台词, {} 条场景指令)",
                    path.display(),
                    report.entries_added,
                    report.commands_dispatched,
                );
                for diagnostic in &report.diagnostics {
                    warn!("{diagnostic}");
                }
            }
            Err(err) => {
                error!("{err}");
                self.sequencer.add_entry(DialogueEntry::new(
                    Some("System".to_string()),
                    format!("Could not load script: {}", self.config.start_script),
                ));
                self.sequencer.add_entry(DialogueEntry::new(
                    Some("System".to_string()),
                    format!(
                        "Check that the file exists under dialogues/{}/",
                        self.resources.language()
                    ),
                ));
            }
        }
    }
}

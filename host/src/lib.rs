//! # Host
//!
//! 演出层：窗口、渲染、音频、输入，驱动 kn-runtime 的脚本加载
//! 与对话序列器。
//!
//! ## 模块结构
//!
//! - [`app`]: 应用状态与主循环逻辑
//! - [`config`]: 配置（文件 + 命令行覆盖）
//! - [`resources`]: 资源路径解析与纹理缓存
//! - [`audio`]: 音乐/音效播放（rodio）
//! - [`scene`]: 舞台状态（背景 + 角色立绘），实现核心层的 Stage 接口
//! - [`text_renderer`]: 对话框渲染
//! - [`splash`]: 启动画面

pub mod app;
pub mod audio;
pub mod config;
pub mod resources;
pub mod scene;
pub mod splash;
pub mod text_renderer;

pub use app::{AppMode, AppState};
pub use audio::AudioManager;
pub use config::{AppConfig, CliArgs};
pub use resources::ResourceManager;
pub use scene::{SceneDirector, SceneState};
pub use splash::SplashScreen;
pub use text_renderer::DialogueRenderer;

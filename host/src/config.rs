//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 资源根目录
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// 语言标签（决定对话脚本目录 `dialogues/{language}/`）
    #[serde(default = "default_language")]
    pub language: String,

    /// 启动脚本文件名（在语言目录内查找）
    #[serde(default = "default_start_script")]
    pub start_script: String,

    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 文本配置
    #[serde(default)]
    pub text: TextConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 启动画面配置
    #[serde(default)]
    pub splash: SplashConfig,

    /// 启动时开启调试叠加层（运行时可用 F1 切换）
    #[serde(default)]
    pub debug_overlay: bool,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,

    /// 是否全屏
    #[serde(default)]
    pub fullscreen: bool,
}

/// 文本配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// 文字显露速度（字符/秒）
    #[serde(default = "default_reveal_cps")]
    pub reveal_cps: f32,

    /// 自定义字体文件名（`fonts/` 目录内；None 使用内置字体）
    #[serde(default)]
    pub font: Option<String>,
}

/// 音频配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// 音乐音量 (0.0 - 1.0)
    #[serde(default = "default_music_volume")]
    pub music_volume: f32,

    /// 音效音量 (0.0 - 1.0)
    #[serde(default = "default_sound_volume")]
    pub sound_volume: f32,
}

/// 启动画面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashConfig {
    /// 启动图片（相对于资源根目录）
    #[serde(default = "default_splash_image")]
    pub image: String,

    /// 启动画面时长（秒）
    #[serde(default = "default_splash_duration")]
    pub duration: f32,

    /// 是否显示进度条
    #[serde(default = "default_true")]
    pub show_bar: bool,
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("host/assets")
}

fn default_language() -> String {
    "en-us".to_string()
}

fn default_start_script() -> String {
    "ch0.txt".to_string()
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

fn default_window_title() -> String {
    "Kinetic Novel Engine".to_string()
}

fn default_reveal_cps() -> f32 {
    40.0
}

fn default_music_volume() -> f32 {
    0.5
}

fn default_sound_volume() -> f32 {
    1.0
}

fn default_splash_image() -> String {
    "backgrounds/splash.png".to_string()
}

fn default_splash_duration() -> f32 {
    3.0
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            language: default_language(),
            start_script: default_start_script(),
            window: WindowConfig::default(),
            text: TextConfig::default(),
            audio: AudioConfig::default(),
            splash: SplashConfig::default(),
            debug_overlay: false,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
            fullscreen: false,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            reveal_cps: default_reveal_cps(),
            font: None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: default_music_volume(),
            sound_volume: default_sound_volume(),
        }
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            image: default_splash_image(),
            duration: default_splash_duration(),
            show_bar: true,
        }
    }
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件解析失败
    #[error("配置文件 {path} 格式错误: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 加载配置，失败时回退到默认值
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}，使用默认配置");
                Self::default()
            }
        }
    }

    /// 应用命令行覆盖
    pub fn apply_cli(mut self, args: &CliArgs) -> Self {
        if let Some(script) = &args.script {
            self.start_script = script.clone();
        }
        if let Some(language) = &args.language {
            self.language = language.clone();
        }
        if let Some(cps) = args.text_speed {
            self.text.reveal_cps = cps;
        }
        if args.fullscreen {
            self.window.fullscreen = true;
        }
        self
    }
}

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "kinetic-novel", about = "线性视觉小说演出引擎")]
pub struct CliArgs {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// 启动脚本文件名（覆盖配置）
    #[arg(long)]
    pub script: Option<String>,

    /// 语言标签，如 en-us / es-es（覆盖配置）
    #[arg(long)]
    pub language: Option<String>,

    /// 文字显露速度，字符/秒（覆盖配置）
    #[arg(long)]
    pub text_speed: Option<f32>,

    /// 全屏启动
    #[arg(long)]
    pub fullscreen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.language, "en-us");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.text.reveal_cps, 40.0);
        assert!(config.splash.show_bar);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "language": "es-es", "window": { "width": 1366 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.language, "es-es");
        assert_eq!(config.window.width, 1366);
        // 未指定的字段取默认值
        assert_eq!(config.window.height, 720);
        assert_eq!(config.start_script, "ch0.txt");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "start_script": "ch1.txt" }}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.start_script, "ch1.txt");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(matches!(
            AppConfig::load("no/such/config.json"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_or_default_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let config = AppConfig::load_or_default(file.path());
        assert_eq!(config.language, "en-us");
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            config: PathBuf::from("config.json"),
            script: Some("ch2.txt".to_string()),
            language: Some("es-es".to_string()),
            text_speed: Some(80.0),
            fullscreen: true,
        };

        let config = AppConfig::default().apply_cli(&args);
        assert_eq!(config.start_script, "ch2.txt");
        assert_eq!(config.language, "es-es");
        assert_eq!(config.text.reveal_cps, 80.0);
        assert!(config.window.fullscreen);
    }
}

//! # Audio 模块
//!
//! 音频管理系统，使用 rodio 库实现。
//! 支持 MP3, WAV, FLAC, OGG 格式。
//!
//! ## 功能特性
//!
//! - 音乐播放：循环流，切换曲目时停止旧的播放
//! - 音效播放：一次性、可多个同时播放
//! - 音量控制：音乐/音效独立
//!
//! 播放路径上的一切失败都是"告警并继续"——缺失或损坏的音频
//! 文件不会中断演出。

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// 音频初始化错误
///
/// 只有创建输出流可能失败（如无音频设备）；播放路径不返回错误。
#[derive(Error, Debug)]
pub enum AudioError {
    /// 无法打开默认音频输出
    #[error("无法初始化音频输出: {0}")]
    Output(#[from] rodio::StreamError),
}

/// 音频管理器
///
/// 负责音乐与音效的播放状态。构造失败（无设备）时调用方应
/// 降级为静音运行，而不是中止程序。
pub struct AudioManager {
    /// 音频输出流（必须保持存活）
    _stream: OutputStream,
    /// 音频输出句柄
    handle: OutputStreamHandle,
    /// 音乐播放器
    music_sink: Option<Sink>,
    /// 当前音乐名（用于日志与去重判断）
    current_music: Option<String>,
    /// 音乐音量 (0.0 - 1.0)
    music_volume: f32,
    /// 音效音量 (0.0 - 1.0)
    sound_volume: f32,
}

impl AudioManager {
    /// 创建音频管理器
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;

        Ok(Self {
            _stream: stream,
            handle,
            music_sink: None,
            current_music: None,
            music_volume: 1.0,
            sound_volume: 1.0,
        })
    }

    /// 播放音乐
    ///
    /// 切换曲目时先停止当前播放。`looping` 为 true 时无限循环。
    pub fn play_music(&mut self, path: &Path, looping: bool) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }

        let Some(source) = open_source(path) else {
            return;
        };
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("无法创建音乐播放器: {err}");
                return;
            }
        };

        sink.set_volume(self.music_volume);
        if looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        info!("播放音乐: {}", path.display());
        self.music_sink = Some(sink);
        self.current_music = Some(path.display().to_string());
    }

    /// 停止音乐
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }
        self.current_music = None;
    }

    /// 播放一次性音效
    ///
    /// 音效 sink 被 detach，播完自动释放，可与音乐及其他音效并行。
    pub fn play_sound(&self, path: &Path) {
        let Some(source) = open_source(path) else {
            return;
        };
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("无法创建音效播放器: {err}");
                return;
            }
        };

        sink.set_volume(self.sound_volume);
        sink.append(source);
        sink.detach();
    }

    /// 设置音乐音量（0.0 - 1.0，立即生效）
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.music_sink {
            sink.set_volume(self.music_volume);
        }
    }

    /// 设置音效音量（0.0 - 1.0，对之后播放的音效生效）
    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    /// 当前音乐音量
    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// 当前音效音量
    pub fn sound_volume(&self) -> f32 {
        self.sound_volume
    }

    /// 当前正在播放的音乐（None 表示没有）
    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }
}

/// 打开并解码音频文件，失败时告警并返回 None
fn open_source(path: &Path) -> Option<Decoder<BufReader<File>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!("无法打开音频文件 {}: {err}", path.display());
            return None;
        }
    };

    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source),
        Err(err) => {
            warn!("无法解码音频文件 {}: {err}", path.display());
            None
        }
    }
}

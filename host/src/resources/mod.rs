//! # Resources 模块
//!
//! 资源管理系统，负责纹理的加载缓存和各类资源文件的路径解析。
//!
//! ## 设计说明
//!
//! - `ResourceManager` 在启动时构造一次，按 `&mut` 传递，
//!   不存在任何全局/隐式访问
//! - 缺失资源一律"告警并继续"：加载函数返回 `Option`，
//!   调用方画不出缺失的纹理，但演出不会中断
//!
//! ## 模块结构
//!
//! - `path`: 逻辑名 → 资源树路径（纯函数）
//! - `cache`: 带预算的 LRU 纹理缓存

pub mod cache;
pub mod path;

pub use cache::{CacheStats, TextureCache};

use macroquad::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 资源管理器
///
/// 持有资源根目录、语言标签和纹理缓存。
#[derive(Debug)]
pub struct ResourceManager {
    /// 资源根目录
    assets_root: PathBuf,
    /// 当前语言标签（决定对话脚本目录）
    language: String,
    /// 纹理缓存
    textures: TextureCache,
}

impl ResourceManager {
    /// 创建资源管理器
    pub fn new(assets_root: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            assets_root: assets_root.into(),
            language: language.into(),
            textures: TextureCache::with_default_budget(),
        }
    }

    /// 当前语言标签
    pub fn language(&self) -> &str {
        &self.language
    }

    /// 切换语言标签
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// 把资源树内的逻辑路径解析为实际文件路径
    pub fn resolve(&self, logical: &str) -> PathBuf {
        self.assets_root.join(logical)
    }

    /// 对话脚本文件的实际路径（按当前语言）
    pub fn dialogue_file(&self, file: &str) -> PathBuf {
        self.resolve(&path::dialogue_path(&self.language, file))
    }

    /// 字体文件的实际路径
    pub fn font_file(&self, name: &str) -> PathBuf {
        self.resolve(&path::font_path(name))
    }

    /// 加载背景纹理（经缓存）
    pub async fn background(&mut self, name: &str) -> Option<Texture2D> {
        let logical = path::background_path(name);
        self.texture(&logical).await
    }

    /// 加载角色立绘纹理（经缓存）
    pub async fn character_sprite(&mut self, name: &str, emotion: &str) -> Option<Texture2D> {
        let logical = path::character_sprite_path(name, emotion);
        self.texture(&logical).await
    }

    /// 按逻辑路径加载任意纹理（经缓存）
    pub async fn texture(&mut self, logical: &str) -> Option<Texture2D> {
        if let Some(texture) = self.textures.get(logical) {
            return Some(texture);
        }

        let full = self.resolve(logical);
        match load_texture(&full.to_string_lossy()).await {
            Ok(texture) => {
                debug!("已加载纹理: {logical}");
                self.textures.insert(logical.to_string(), texture.clone());
                Some(texture)
            }
            Err(err) => {
                warn!("纹理缺失: {} ({err:?})", full.display());
                None
            }
        }
    }

    /// 查找音乐文件（ogg 优先，mp3 兜底），找不到时告警并返回 None
    pub fn music_file(&self, name: &str) -> Option<PathBuf> {
        self.first_existing(&path::music_candidates(name))
            .or_else(|| {
                warn!("音乐缺失: {name}");
                None
            })
    }

    /// 查找音效文件（wav 优先，ogg 兜底），找不到时告警并返回 None
    pub fn sound_file(&self, name: &str) -> Option<PathBuf> {
        self.first_existing(&path::sound_candidates(name))
            .or_else(|| {
                warn!("音效缺失: {name}");
                None
            })
    }

    /// 纹理缓存统计
    pub fn texture_stats(&self) -> CacheStats {
        self.textures.stats()
    }

    /// 返回候选列表中第一个实际存在的文件
    fn first_existing(&self, candidates: &[String]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|logical| self.resolve(logical))
            .find(|path| path.exists())
    }
}

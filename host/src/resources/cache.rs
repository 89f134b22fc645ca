//! # Texture Cache 模块
//!
//! 带显存预算和 LRU 驱逐的纹理缓存。
//!
//! 键是资源树内的逻辑路径（如 `backgrounds/forest.png`）。

use macroquad::prelude::*;
use std::collections::{HashMap, VecDeque};

/// 默认显存预算：128 MB
pub const DEFAULT_TEXTURE_BUDGET_MB: usize = 128;

/// 缓存条目
#[derive(Debug)]
struct CacheEntry {
    /// 纹理对象
    texture: Texture2D,
    /// 估算的显存占用（字节，RGBA8）
    size_bytes: usize,
}

impl CacheEntry {
    fn new(texture: Texture2D) -> Self {
        let size_bytes = (texture.width() as usize) * (texture.height() as usize) * 4;
        Self {
            texture,
            size_bytes,
        }
    }
}

/// 纹理缓存
///
/// 超出预算时按 LRU 顺序驱逐最久未使用的纹理。
#[derive(Debug)]
pub struct TextureCache {
    /// 缓存条目（逻辑路径 -> 条目）
    entries: HashMap<String, CacheEntry>,
    /// LRU 顺序（最近使用的在队尾）
    lru_order: VecDeque<String>,
    /// 显存预算（字节）
    budget_bytes: usize,
    /// 当前占用（字节）
    used_bytes: usize,
    /// 统计：命中 / 未命中 / 驱逐
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl TextureCache {
    /// 创建纹理缓存
    ///
    /// # 参数
    /// - `budget_mb`: 显存预算（MB）
    pub fn new(budget_mb: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru_order: VecDeque::new(),
            budget_bytes: budget_mb * 1024 * 1024,
            used_bytes: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// 使用默认预算创建缓存
    pub fn with_default_budget() -> Self {
        Self::new(DEFAULT_TEXTURE_BUDGET_MB)
    }

    /// 获取纹理（命中时更新 LRU 顺序）
    pub fn get(&mut self, key: &str) -> Option<Texture2D> {
        if let Some(entry) = self.entries.get(key) {
            let texture = entry.texture.clone();
            self.hits += 1;
            self.touch(key);
            Some(texture)
        } else {
            self.misses += 1;
            None
        }
    }

    /// 检查是否已缓存
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 插入纹理，必要时先驱逐到预算以内
    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        let key = key.into();
        let entry = CacheEntry::new(texture);
        let new_size = entry.size_bytes;

        // 覆盖旧条目
        if let Some(old) = self.entries.remove(&key) {
            self.used_bytes = self.used_bytes.saturating_sub(old.size_bytes);
            self.remove_from_lru(&key);
        }

        while self.used_bytes + new_size > self.budget_bytes {
            if !self.evict_one() {
                break;
            }
        }

        self.used_bytes += new_size;
        self.entries.insert(key.clone(), entry);
        self.lru_order.push_back(key);
    }

    /// 移除指定纹理
    pub fn remove(&mut self, key: &str) {
        if let Some(entry) = self.entries.remove(key) {
            self.used_bytes = self.used_bytes.saturating_sub(entry.size_bytes);
            self.remove_from_lru(key);
        }
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru_order.clear();
        self.used_bytes = 0;
    }

    /// 缓存条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 当前占用（字节）
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// 预算（字节）
    pub fn budget_bytes(&self) -> usize {
        self.budget_bytes
    }

    /// 获取统计信息
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            used_bytes: self.used_bytes,
            budget_bytes: self.budget_bytes,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    /// 更新 LRU 顺序（移到队尾）
    fn touch(&mut self, key: &str) {
        self.remove_from_lru(key);
        self.lru_order.push_back(key.to_string());
    }

    fn remove_from_lru(&mut self, key: &str) {
        self.lru_order.retain(|k| k != key);
    }

    /// 驱逐最久未使用的纹理，返回是否成功
    fn evict_one(&mut self) -> bool {
        let Some(key) = self.lru_order.pop_front() else {
            return false;
        };
        if let Some(entry) = self.entries.remove(&key) {
            self.used_bytes = self.used_bytes.saturating_sub(entry.size_bytes);
            self.evictions += 1;
        }
        true
    }
}

/// 缓存统计信息
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// 缓存条目数量
    pub entries: usize,
    /// 当前占用（字节）
    pub used_bytes: usize,
    /// 预算（字节）
    pub budget_bytes: usize,
    /// 命中次数
    pub hits: u64,
    /// 未命中次数
    pub misses: u64,
    /// 驱逐次数
    pub evictions: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let to_mb = |bytes: usize| bytes as f64 / 1024.0 / 1024.0;
        let hit_rate = if self.hits + self.misses > 0 {
            self.hits as f64 / (self.hits + self.misses) as f64 * 100.0
        } else {
            0.0
        };
        write!(
            f,
            "{} entries, {:.1}MB / {:.1}MB, hit rate {:.1}%, evictions {}",
            self.entries,
            to_mb(self.used_bytes),
            to_mb(self.budget_bytes),
            hit_rate,
            self.evictions,
        )
    }
}

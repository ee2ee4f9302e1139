//! 物品栏配置：启动时读一次，之后不可变

use std::path::Path;

use bevy::prelude::*;
use serde_derive::Deserialize;
use thiserror::Error;

use super::binding::{MAX_SLOTS, MIN_SLOTS};

pub const CONFIG_PATH: &str = "assets/config/item_slot.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Bottom,
}

impl VerticalAlign {
    /// 只认 "TOP" / "BOTTOM"，其它一律 BOTTOM
    pub fn parse(s: &str) -> Self {
        match s {
            "TOP" => VerticalAlign::Top,
            _ => VerticalAlign::Bottom,
        }
    }
}

/// 配置文件的原始形态，字段全部可缺省
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    background_color: String,
    background_alpha: f32,
    corner_radius: f32,
    slot_count: i64,
    margin_left: i64,
    margin_right: i64,
    margin_top: i64,
    margin_bottom: i64,
    vertical_align: String,
    slot_font_size: f32,
    item_list_font_size: f32,
    line_weight: f32,
    line_color: String,
    line_margin: i64,
    restrict_interaction_to_map_screen: bool,
    icon_set: String,
    label_font: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            background_color: "0x000000".into(),
            background_alpha: 0.3,
            corner_radius: 10.0,
            slot_count: 5,
            margin_left: 10,
            margin_right: 10,
            margin_top: 10,
            margin_bottom: 10,
            vertical_align: "BOTTOM".into(),
            slot_font_size: 10.0,
            item_list_font_size: 15.0,
            line_weight: 2.0,
            line_color: "0xF0E68C".into(),
            line_margin: 8,
            restrict_interaction_to_map_screen: true,
            icon_set: "system/IconSet.png".into(),
            label_font: String::new(),
        }
    }
}

/// 规范化后的配置
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ItemSlotConfig {
    pub background_color: u32,
    pub background_alpha: f32,
    pub corner_radius: f32,
    /// 1..=9
    pub slot_count: usize,
    pub margin_left: i32,
    pub margin_right: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub vertical_align: VerticalAlign,
    pub slot_font_size: f32,
    pub item_list_font_size: f32,
    pub line_weight: f32,
    pub line_color: u32,
    pub line_margin: i32,
    /// 为 false 时在任何画面都响应槽位点击
    pub restrict_interaction_to_map_screen: bool,
    /// 图标图集，相对 assets/，每行 16 个 32×32 图标
    pub icon_set: String,
    /// 槽位标签用的字体（粗体），不配置时用 Bevy 自带字体
    pub label_font: Option<String>,
}

impl Default for ItemSlotConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

impl ItemSlotConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(src)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// 读取配置；任何问题都退回默认值
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("{} not found, using default item slot config", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("{}: {e}; using default item slot config", path.display());
                Self::default()
            }
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let margin = |v: i64| v.clamp(0, i32::MAX as i64) as i32;
        Self {
            background_color: parse_hex_color(&raw.background_color, 0x000000),
            background_alpha: raw.background_alpha.clamp(0.0, 1.0),
            corner_radius: raw.corner_radius.max(0.0),
            slot_count: raw.slot_count.clamp(MIN_SLOTS as i64, MAX_SLOTS as i64) as usize,
            margin_left: margin(raw.margin_left),
            margin_right: margin(raw.margin_right),
            margin_top: margin(raw.margin_top),
            margin_bottom: margin(raw.margin_bottom),
            vertical_align: VerticalAlign::parse(&raw.vertical_align),
            slot_font_size: raw.slot_font_size,
            item_list_font_size: raw.item_list_font_size,
            line_weight: raw.line_weight.max(0.0),
            line_color: parse_hex_color(&raw.line_color, 0xF0E68C),
            line_margin: margin(raw.line_margin),
            restrict_interaction_to_map_screen: raw.restrict_interaction_to_map_screen,
            icon_set: raw.icon_set,
            label_font: Some(raw.label_font).filter(|f| !f.trim().is_empty()),
        }
    }
}

/// `0xRRGGBB` / `#RRGGBB` / `RRGGBB`
fn parse_hex_color(s: &str, fallback: u32) -> u32 {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('#'))
        .unwrap_or(s);
    match u32::from_str_radix(digits, 16) {
        Ok(v) if v <= 0xFF_FFFF => v,
        _ => {
            warn!("invalid color {s:?}, falling back to {fallback:#08x}");
            fallback
        }
    }
}

/// 0xRRGGBB + alpha → Color
pub fn hex_to_color(hex: u32, alpha: f32) -> Color {
    Color::srgba_u8(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

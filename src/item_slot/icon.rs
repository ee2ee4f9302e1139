use bevy::prelude::*;

use super::config::ItemSlotConfig;

/// 图集排列方式：固定尺寸的图标按行排列
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSheet {
    pub icon_width: i32,
    pub icon_height: i32,
    pub columns: u32,
}

impl Default for IconSheet {
    fn default() -> Self {
        Self {
            icon_width: 32,
            icon_height: 32,
            columns: 16,
        }
    }
}

impl IconSheet {
    /// 第 `index` 个图标在图集中的像素区域
    pub fn region(&self, index: u32) -> Rect {
        let x = (index % self.columns) as f32 * self.icon_width as f32;
        let y = (index / self.columns) as f32 * self.icon_height as f32;
        Rect::new(x, y, x + self.icon_width as f32, y + self.icon_height as f32)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.icon_width, self.icon_height)
    }
}

/// 叠加层共用的资源：图标图集和标签字体
///
/// `label_font` 为默认句柄时使用 Bevy 自带字体。
#[derive(Resource, Debug, Clone, Default)]
pub struct OverlayAssets {
    pub image: Handle<Image>,
    pub sheet: IconSheet,
    pub label_font: Handle<Font>,
}

/// 没有 AssetServer（无渲染环境）时保留默认句柄
pub fn load_overlay_assets(
    mut assets: ResMut<OverlayAssets>,
    config: Res<ItemSlotConfig>,
    asset_server: Option<Res<AssetServer>>,
) {
    let Some(server) = asset_server else { return };
    assets.image = server.load(config.icon_set.clone());
    if let Some(font) = &config.label_font {
        assets.label_font = server.load(font.clone());
    }
}

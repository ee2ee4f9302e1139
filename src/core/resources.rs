use bevy::prelude::*;

/// 屏幕与地图图块尺寸，物品栏布局只在创建时读取一次
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScreenMetrics {
    pub width: i32,
    pub height: i32,
    pub tile_width: i32,
    pub tile_height: i32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 816,
            height: 624,
            tile_width: 48,
            tile_height: 48,
        }
    }
}

/// 宿主的消息窗口
#[derive(Resource, Debug, Default)]
pub struct MessageWindow {
    pub open: bool,
}

/// 本帧的输入快照（边沿触发）
#[derive(Resource, Debug, Default, Clone)]
pub struct FrameInput {
    /// 本帧新按下的数字键 1..=9，按键顺序
    pub digits: Vec<u8>,
    /// 本帧新触发的左键点击位置（左上角为原点）
    pub click: Option<Vec2>,
    /// 本帧左键松开
    pub released: bool,
}

impl FrameInput {
    pub fn clear(&mut self) {
        self.digits.clear();
        self.click = None;
        self.released = false;
    }
}

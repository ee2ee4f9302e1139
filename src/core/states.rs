use bevy::prelude::*;

/// 游戏运行的大状态
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    Loading,
    InGame,
}

/// 宿主当前所在的画面
///
/// 物品栏只在 `Map` 上真正绘制；`ItemList` 负责槽位绑定。
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum HostScreen {
    #[default]
    Map,
    ItemList,
    Menu,
}

impl HostScreen {
    pub fn is_map(self) -> bool {
        self == HostScreen::Map
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "map" | "m" => Some(HostScreen::Map),
            "items" | "item" | "i" => Some(HostScreen::ItemList),
            "menu" => Some(HostScreen::Menu),
            _ => None,
        }
    }
}

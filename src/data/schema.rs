use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::{Deserialize, Serialize};

/// 静态物品表中的一项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id:   String,
    pub name: String,
    /// IconSet 图集中的图标序号
    #[serde(default)] pub icon_index: u32,
    /// potion / scroll / key ...
    #[serde(default)] pub item_type: String,
    #[serde(default)] pub atk:  i32,
    #[serde(default)] pub heal: i32,
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}

impl ItemList {
    /// 按 id 查找，不区分大小写
    pub fn find(&self, id: &str) -> Option<&ItemEntry> {
        self.items.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }
}

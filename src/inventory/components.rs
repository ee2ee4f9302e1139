use bevy::prelude::*;
use serde_derive::{Deserialize, Serialize};

use crate::data::schema::ItemEntry;
use crate::item_slot::binding::{ItemRef, SlotBindings, SlotId};
use crate::item_slot::panel::OwnedItems;

/// 玩家背包（挂在 Resource），也是存档里的队伍物品容器
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backpack {
    pub slots: Vec<ItemStack>,   // 固定容量，空位用 count=0 占位
    pub capacity: usize,
    /// 物品栏绑定表，第一次启用物品栏时创建
    #[serde(default)]
    pub slot_bindings: Option<SlotBindings>,
}

/// 运行时物品实例
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemStack {
    pub proto: ItemEntry,  // 直接复制静态表条目即可
    pub count: u32,
}

impl ItemStack {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            id: self.proto.id.clone(),
            name: self.proto.name.clone(),
            icon_index: self.proto.icon_index,
            have_count: self.count,
        }
    }
}

impl Backpack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![ItemStack::default(); capacity],
            capacity,
            slot_bindings: None,
        }
    }

    pub fn count_of(&self, id: &str) -> u32 {
        self.slots.owned_count(id)
    }

    /// 非空的格子
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    /// 放入物品；背包满时返回 false
    pub fn give(&mut self, proto: &ItemEntry, count: u32) -> bool {
        // 查找是否已有同 ID 堆叠
        if let Some(stack) = self
            .slots
            .iter_mut()
            .find(|s| !s.is_empty() && s.proto.id == proto.id)
        {
            stack.count += count;
            return true;
        }
        // 找空位
        if let Some(slot) = self.slots.iter_mut().find(|s| s.is_empty()) {
            *slot = ItemStack {
                proto: proto.clone(),
                count,
            };
            return true;
        }
        false
    }

    /// 扣掉一个，用完后清空格子
    pub fn consume_one(&mut self, id: &str) -> Option<u32> {
        let stack = self
            .slots
            .iter_mut()
            .find(|s| !s.is_empty() && s.proto.id == id)?;
        stack.count -= 1;
        let left = stack.count;
        if left == 0 {
            *stack = ItemStack::default();
        }
        Some(left)
    }
}

impl OwnedItems for Vec<ItemStack> {
    fn owned_count(&self, item_id: &str) -> u32 {
        self.iter()
            .filter(|s| !s.is_empty() && s.proto.id == item_id)
            .map(|s| s.count)
            .sum()
    }
}

/* ---------------------------- 物品画面 ---------------------------- */

/// 行尾追加的槽位编号
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBadge {
    pub slot: SlotId,
    pub font_size: f32,
}

#[derive(Debug, Clone)]
pub struct ItemListRow {
    pub item: ItemRef,
    pub badge: Option<RowBadge>,
}

/// 宿主的物品列表窗口
#[derive(Resource, Debug, Default)]
pub struct ItemListWindow {
    pub rows: Vec<ItemListRow>,
    /// 光标所在行
    pub index: usize,
}

impl ItemListWindow {
    /// 当前高亮的物品
    pub fn highlighted(&self) -> Option<&ItemRef> {
        self.rows.get(self.index).map(|r| &r.item)
    }

    /// 按背包内容重建行，光标越界时收回到最后一行
    pub fn rebuild(&mut self, backpack: &Backpack) {
        self.rows = backpack
            .stacks()
            .map(|s| ItemListRow {
                item: s.item_ref(),
                badge: None,
            })
            .collect();
        if self.index >= self.rows.len() {
            self.index = self.rows.len().saturating_sub(1);
        }
    }
}

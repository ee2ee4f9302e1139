//! 槽位绑定表：slot-id → 物品引用，跟随存档保存

use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

/// 槽位编号，从 1 开始
pub type SlotId = u8;

/// 槽位数量上下限
pub const MIN_SLOTS: usize = 1;
pub const MAX_SLOTS: usize = 9;

/// 存档里的物品引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub icon_index: u32,
    /// 最近一次刷新时的持有数
    #[serde(default)]
    pub have_count: u32,
}

/// 槽位绑定表
///
/// 不变式：
/// - 1..=N 每个编号都有一项（可能为空）
/// - 同一个物品 id 最多出现在一个槽位
///
/// 序列化为 `{"1": null, "2": {...}}`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotBindings {
    entries: BTreeMap<SlotId, Option<ItemRef>>,
}

impl SlotBindings {
    pub fn with_slot_count(count: usize) -> Self {
        let mut bindings = Self::default();
        bindings.reconcile(count);
        bindings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_slot(&self, slot: SlotId) -> bool {
        self.entries.contains_key(&slot)
    }

    pub fn get(&self, slot: SlotId) -> Option<&ItemRef> {
        self.entries.get(&slot).and_then(Option::as_ref)
    }

    /// 物品绑定在哪个槽位
    pub fn slot_of(&self, item_id: &str) -> Option<SlotId> {
        self.entries
            .iter()
            .find(|(_, item)| item.as_ref().is_some_and(|it| it.id == item_id))
            .map(|(slot, _)| *slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, Option<&ItemRef>)> {
        self.entries.iter().map(|(slot, item)| (*slot, item.as_ref()))
    }

    /// 调整到 `count` 个槽位
    ///
    /// 多出的编号被丢弃，缺少的编号补空，保留编号上的绑定不变；
    /// 旧存档里重复绑定的物品只保留编号最小的那一个。
    /// 重复调用结果不变。
    pub fn reconcile(&mut self, count: usize) {
        let count = count.clamp(MIN_SLOTS, MAX_SLOTS) as SlotId;

        self.entries.retain(|slot, _| (1..=count).contains(slot));
        for slot in 1..=count {
            self.entries.entry(slot).or_insert(None);
        }

        let mut seen: Vec<String> = Vec::new();
        for item in self.entries.values_mut() {
            let Some(it) = item else { continue };
            if seen.contains(&it.id) {
                *item = None;
            } else {
                seen.push(it.id.clone());
            }
        }
    }

    /// 清掉已经不再持有的物品，其余写回实时持有数；返回被清掉的槽位
    pub fn prune<F>(&mut self, mut owned: F) -> Vec<SlotId>
    where
        F: FnMut(&str) -> u32,
    {
        let mut cleared = Vec::new();
        for (slot, entry) in self.entries.iter_mut() {
            let Some(it) = entry else { continue };
            match owned(&it.id) {
                0 => {
                    *entry = None;
                    cleared.push(*slot);
                }
                count => it.have_count = count,
            }
        }
        cleared
    }

    pub(super) fn bind(&mut self, slot: SlotId, item: ItemRef) {
        if let Some(entry) = self.entries.get_mut(&slot) {
            *entry = Some(item);
        }
    }

    pub(super) fn unbind(&mut self, slot: SlotId) {
        if let Some(entry) = self.entries.get_mut(&slot) {
            *entry = None;
        }
    }
}

#[cfg(test)]
pub(crate) fn item(id: &str, icon_index: u32) -> ItemRef {
    ItemRef {
        id: id.to_string(),
        name: id.to_string(),
        icon_index,
        have_count: 1,
    }
}

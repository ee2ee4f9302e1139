//! 把物品列表里高亮的物品放进槽位

use bevy::prelude::*;

use super::binding::{ItemRef, SlotBindings, SlotId};

/// 一次绑定请求的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Bound(SlotId),
    Unbound(SlotId),
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NothingHighlighted,
    StoreUninitialized,
    UnknownSlot,
    /// 物品已经在别的槽位
    AlreadyBound(SlotId),
    /// 目标槽位放着别的物品
    SlotOccupied,
}

impl Assignment {
    /// 绑定表是否被改动（改动后物品列表需要重绘）
    pub fn changed(&self) -> bool {
        !matches!(self, Assignment::Rejected(_))
    }
}

/// 按决策表处理一次绑定请求
///
/// 同一物品再次放进同一槽位视为取消；拒绝时绑定表保持原样。
pub fn assign(
    store: Option<&mut SlotBindings>,
    slot: SlotId,
    highlighted: Option<&ItemRef>,
) -> Assignment {
    let Some(item) = highlighted else {
        return Assignment::Rejected(Rejection::NothingHighlighted);
    };
    let Some(store) = store else {
        return Assignment::Rejected(Rejection::StoreUninitialized);
    };
    if !store.contains_slot(slot) {
        return Assignment::Rejected(Rejection::UnknownSlot);
    }

    if let Some(current) = store.get(slot) {
        if current.id == item.id {
            store.unbind(slot);
            debug!("slot {slot}: unbound {}", item.id);
            return Assignment::Unbound(slot);
        }
    }

    if let Some(other) = store.slot_of(&item.id) {
        return Assignment::Rejected(Rejection::AlreadyBound(other));
    }
    if store.get(slot).is_some() {
        return Assignment::Rejected(Rejection::SlotOccupied);
    }

    store.bind(slot, item.clone());
    debug!("slot {slot}: bound {}", item.id);
    Assignment::Bound(slot)
}

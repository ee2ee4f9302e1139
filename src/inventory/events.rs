use bevy::prelude::*;

#[derive(Event)]
pub struct GiveItemEvent {
    pub id:    String,
    pub count: u32,
}

/// 重绘物品列表（并打印）
#[derive(Event)]
pub struct ListInventoryEvent;

/// 宿主标准的物品使用流程
#[derive(Event, Debug, Clone)]
pub struct UseItemEvent {
    pub id: String,
}

/// 使用完成，`left` 为剩余数量
#[derive(Event, Debug, Clone)]
pub struct ItemUsed {
    pub id: String,
    pub left: u32,
}

/// 物品列表画完一行（钩子）
#[derive(Event, Debug, Clone)]
pub struct ItemRowDrawn {
    pub row: usize,
    pub item_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct SaveRequested;

#[derive(Event, Debug, Clone)]
pub struct LoadRequested;

/// 读档完成（钩子）
#[derive(Event, Debug, Clone)]
pub struct SaveLoaded;

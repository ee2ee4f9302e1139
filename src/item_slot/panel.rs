//! 一排槽位：布局在创建时算好，之后修改配置不会生效（需要重建）

use bevy::prelude::*;

use super::binding::{SlotBindings, SlotId};
use super::config::{ItemSlotConfig, VerticalAlign};
use super::icon::IconSheet;
use super::slot::{BoundItemSnapshot, Slot, SlotStyle};
use super::scene::SceneGraph;
use crate::core::resources::ScreenMetrics;

/// 宿主提供的实时持有数
pub trait OwnedItems {
    fn owned_count(&self, item_id: &str) -> u32;
}

/// 面板整体几何
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub box_width: i32,
    pub box_height: i32,
    pub start_x: i32,
    pub start_y: i32,
    /// 相邻槽位的间距
    pub pitch: i32,
    pub slot_width: i32,
    pub slot_height: i32,
}

impl PanelLayout {
    pub fn compute(config: &ItemSlotConfig, screen: &ScreenMetrics) -> Self {
        let pitch = screen.tile_width + config.margin_left + config.margin_right;
        let box_width = config.slot_count as i32 * pitch;
        let box_height = screen.tile_height + config.margin_top + config.margin_bottom;
        let start_x =
            ((screen.width - box_width) as f32 / 2.0 + config.margin_left as f32).floor() as i32;
        let start_y = match config.vertical_align {
            VerticalAlign::Bottom => screen.height - box_height,
            VerticalAlign::Top => config.margin_top,
        };
        Self {
            box_width,
            box_height,
            start_x,
            start_y,
            pitch,
            slot_width: screen.tile_width,
            slot_height: screen.tile_height,
        }
    }

    /// 第 `index` 个槽位（从 0 开始）的矩形
    pub fn slot_rect(&self, index: usize) -> IRect {
        let x = self.start_x + index as i32 * self.pitch;
        IRect::new(x, self.start_y, x + self.slot_width, self.start_y + self.slot_height)
    }
}

#[derive(Debug)]
pub struct SlotPanel {
    style: SlotStyle,
    slots: Vec<Slot>,
    /// 图元当前挂在地图上
    shown: bool,
}

impl SlotPanel {
    pub fn new(config: &ItemSlotConfig, screen: &ScreenMetrics, icons: IconSheet) -> Self {
        let layout = PanelLayout::compute(config, screen);
        let slots = (0..config.slot_count)
            .map(|i| Slot::new(i as SlotId + 1, layout.slot_rect(i)))
            .collect();
        Self {
            style: SlotStyle::from_config(config, icons),
            slots,
            shown: false,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get((id as usize).checked_sub(1)?)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn show(&mut self, scene: &mut dyn SceneGraph, on_map: bool) {
        for slot in &mut self.slots {
            slot.show(scene, on_map, &self.style);
        }
        self.shown = on_map;
    }

    /// 先对照实时持有数清掉用完的物品并刷新持有数，再按绑定表重画每个槽位
    pub fn update(
        &mut self,
        store: &mut SlotBindings,
        items: &dyn OwnedItems,
        scene: &mut dyn SceneGraph,
        on_map: bool,
    ) {
        store.prune(|id| items.owned_count(id));

        for slot in &mut self.slots {
            let snapshot = store
                .get(slot.id())
                .map(|item| BoundItemSnapshot::new(item, item.have_count));
            slot.update(snapshot, scene, on_map, &self.style);
        }
        self.shown = on_map;
    }

    pub fn hide(&mut self, scene: &mut dyn SceneGraph) {
        for slot in &mut self.slots {
            slot.hide(scene);
        }
        self.shown = false;
    }

    /// 点中的槽位
    pub fn hit_test(&self, point: Vec2) -> Option<SlotId> {
        self.slots.iter().find(|s| s.contains(point)).map(Slot::id)
    }

    /// 选中一个槽位，其余全部取消
    pub fn select(&mut self, id: SlotId) {
        for slot in &mut self.slots {
            slot.set_selected(slot.id() == id);
        }
    }

    pub fn selected(&self) -> Option<&Slot> {
        self.slots.iter().find(|s| s.is_selected())
    }
}

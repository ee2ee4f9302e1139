//! 插件的运行时上下文：面板、按钮行和启用开关
//!
//! 面板在第一次 `activate` 时创建，之后一直存在。

use bevy::prelude::*;

use super::binding::SlotBindings;
use super::button_row::SetButtonRow;
use super::config::ItemSlotConfig;
use super::icon::IconSheet;
use super::panel::{OwnedItems, SlotPanel};
use super::scene::SceneGraph;
use super::slot::BoundItemSnapshot;
use crate::core::resources::ScreenMetrics;
use crate::core::states::HostScreen;

#[derive(Resource, Debug, Default)]
pub struct ItemSlotContext {
    pub(super) panel: Option<SlotPanel>,
    pub(super) buttons: Option<SetButtonRow>,
    pub(super) enabled: bool,
}

impl ItemSlotContext {
    pub fn panel(&self) -> Option<&SlotPanel> {
        self.panel.as_ref()
    }

    pub fn buttons(&self) -> Option<&SetButtonRow> {
        self.buttons.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 第一次调用时创建面板并初始化 / 调整绑定表，之后只负责显示
    pub fn activate(
        &mut self,
        config: &ItemSlotConfig,
        metrics: &ScreenMetrics,
        icons: IconSheet,
        store: &mut Option<SlotBindings>,
        items: &dyn OwnedItems,
        scene: &mut dyn SceneGraph,
        on_map: bool,
    ) {
        if let Some(panel) = &mut self.panel {
            panel.show(scene, on_map);
            self.enabled = true;
            return;
        }

        let mut panel = SlotPanel::new(config, metrics, icons);
        match store {
            Some(bindings) => {
                bindings.reconcile(config.slot_count);
                panel.update(bindings, items, scene, on_map);
            }
            None => {
                *store = Some(SlotBindings::with_slot_count(config.slot_count));
                panel.show(scene, on_map);
            }
        }
        info!("item slot panel created ({} slots)", config.slot_count);
        self.panel = Some(panel);
        self.enabled = true;
    }

    pub fn show(&mut self, scene: &mut dyn SceneGraph, on_map: bool) {
        if let Some(panel) = &mut self.panel {
            panel.show(scene, on_map);
        }
        self.enabled = true;
    }

    pub fn refresh(
        &mut self,
        store: &mut Option<SlotBindings>,
        items: &dyn OwnedItems,
        scene: &mut dyn SceneGraph,
        on_map: bool,
    ) {
        self.redraw(store, items, scene, on_map);
        self.enabled = true;
    }

    /// 隐藏并关闭交互
    pub fn hide(&mut self, scene: &mut dyn SceneGraph) {
        self.hide_panel(scene);
        self.enabled = false;
    }

    /// 只摘掉图元，启用开关不变（消息窗口 / 离开地图时用）
    pub(super) fn hide_panel(&mut self, scene: &mut dyn SceneGraph) {
        if let Some(panel) = &mut self.panel {
            panel.hide(scene);
        }
    }

    /// 按绑定表重画，启用开关不变
    pub(super) fn redraw(
        &mut self,
        store: &mut Option<SlotBindings>,
        items: &dyn OwnedItems,
        scene: &mut dyn SceneGraph,
        on_map: bool,
    ) {
        if let (Some(panel), Some(bindings)) = (&mut self.panel, store.as_mut()) {
            panel.update(bindings, items, scene, on_map);
        }
    }

    /// 读档后把绑定表调整到当前槽位数
    pub fn reconcile_after_load(
        &mut self,
        store: &mut Option<SlotBindings>,
        items: &dyn OwnedItems,
        scene: &mut dyn SceneGraph,
        on_map: bool,
    ) {
        let Some(panel) = &self.panel else { return };
        let count = panel.slot_count();
        store
            .get_or_insert_with(|| SlotBindings::with_slot_count(count))
            .reconcile(count);
        if self.enabled {
            self.redraw(store, items, scene, on_map);
        }
    }

    /// 物品画面打开：按需创建数字按钮并画出
    pub fn open_item_screen(
        &mut self,
        slot_count: usize,
        icons: IconSheet,
        scene: &mut dyn SceneGraph,
    ) {
        self.buttons
            .get_or_insert_with(|| SetButtonRow::new(slot_count, icons))
            .show(scene, true);
    }

    pub fn close_item_screen(&mut self, scene: &mut dyn SceneGraph) {
        if let Some(buttons) = &mut self.buttons {
            buttons.hide(scene);
        }
    }

    /// 当前选中槽位里的物品；未启用时视为没有
    pub fn selected_item(&self) -> Option<&BoundItemSnapshot> {
        if !self.enabled {
            return None;
        }
        self.panel.as_ref()?.selected()?.item()
    }

    /// 选中物品的某个字段，拿不到时为 None
    pub fn current_bound_item_field(&self, field: &str) -> Option<String> {
        let item = self.selected_item()?;
        match field {
            "id" => Some(item.id.clone()),
            "name" => Some(item.name.clone()),
            "iconIndex" | "icon_index" => Some(item.icon_index.to_string()),
            "haveCount" | "have_count" | "quantity" => Some(item.owned.to_string()),
            _ => None,
        }
    }

    /// 选中物品的实际持有数
    pub fn current_bound_quantity(&self, items: &dyn OwnedItems) -> u32 {
        self.selected_item()
            .map_or(0, |item| items.owned_count(&item.id))
    }

    /// 槽位交互是否在此画面生效
    pub(super) fn interactive_on(&self, screen: HostScreen, config: &ItemSlotConfig) -> bool {
        self.enabled && (screen.is_map() || !config.restrict_interaction_to_map_screen)
    }

    /// 点击落在可见的槽位上时，宿主的点击移动要被拦下
    pub fn suppresses_map_touch(
        &self,
        point: Vec2,
        screen: HostScreen,
        config: &ItemSlotConfig,
    ) -> bool {
        if !self.interactive_on(screen, config) {
            return false;
        }
        self.panel
            .as_ref()
            .is_some_and(|p| p.is_shown() && p.hit_test(point).is_some())
    }
}

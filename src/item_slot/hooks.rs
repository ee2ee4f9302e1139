//! 挂在宿主钩子上的系统

use bevy::prelude::*;

use super::config::ItemSlotConfig;
use super::context::ItemSlotContext;
use super::icon::OverlayAssets;
use super::router::{route_frame, RouteEnv};
use super::scene::BevyScene;
use crate::core::events::{LogEvent, MapMoveRequested, MapTouchAttempt, MessageClosed, MessageOpened};
use crate::core::resources::{FrameInput, ScreenMetrics};
use crate::core::states::HostScreen;
use crate::inventory::components::{Backpack, ItemListWindow, RowBadge};
use crate::inventory::events::{ItemRowDrawn, ItemUsed, ListInventoryEvent, SaveLoaded, UseItemEvent};

/// 插件命令
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSlotCommand {
    /// 创建（第一次）并显示
    Activate,
    Show,
    Hide,
    Refresh,
    /// 对选中槽位的物品走宿主的默认使用流程
    UseSelected,
}

pub fn run_commands(
    mut reader: EventReader<ItemSlotCommand>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    config: Res<ItemSlotConfig>,
    metrics: Res<ScreenMetrics>,
    mut backpack: ResMut<Backpack>,
    screen: Res<State<HostScreen>>,
    mut use_item: EventWriter<UseItemEvent>,
    mut log: EventWriter<LogEvent>,
) {
    let on_map = screen.get().is_map();
    let backpack = &mut *backpack;
    for cmd in reader.read() {
        let mut scene = BevyScene::new(&mut commands, &assets);
        match cmd {
            ItemSlotCommand::Activate => ctx.activate(
                &config,
                &metrics,
                assets.sheet,
                &mut backpack.slot_bindings,
                &backpack.slots,
                &mut scene,
                on_map,
            ),
            ItemSlotCommand::Show => ctx.show(&mut scene, on_map),
            ItemSlotCommand::Hide => ctx.hide(&mut scene),
            ItemSlotCommand::Refresh => ctx.refresh(
                &mut backpack.slot_bindings,
                &backpack.slots,
                &mut scene,
                on_map,
            ),
            ItemSlotCommand::UseSelected => match ctx.selected_item() {
                Some(item) => {
                    use_item.write(UseItemEvent {
                        id: item.id.clone(),
                    });
                }
                None => {
                    log.write(LogEvent("没有选中的槽位物品".into()));
                }
            },
        }
    }
}

/// 每帧：数字键 / 点击分发
pub fn route_input(
    input: Res<FrameInput>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    config: Res<ItemSlotConfig>,
    mut backpack: ResMut<Backpack>,
    window: Res<ItemListWindow>,
    screen: Res<State<HostScreen>>,
    mut refresh: EventWriter<ListInventoryEvent>,
) {
    if input.digits.is_empty() && input.click.is_none() && !input.released {
        return;
    }
    let backpack = &mut *backpack;
    let env = RouteEnv {
        screen: *screen.get(),
        config: &config,
        highlighted: window.highlighted(),
        items: &backpack.slots,
    };
    let mut scene = BevyScene::new(&mut commands, &assets);
    let effects = route_frame(&mut ctx, &input, &env, &mut backpack.slot_bindings, &mut scene);
    if effects.item_list_dirty {
        refresh.write(ListInventoryEvent);
    }
}

/// 点在槽位上的地图点击不再交给宿主移动
pub fn arbitrate_map_touch(
    mut reader: EventReader<MapTouchAttempt>,
    ctx: Res<ItemSlotContext>,
    config: Res<ItemSlotConfig>,
    screen: Res<State<HostScreen>>,
    mut writer: EventWriter<MapMoveRequested>,
) {
    for ev in reader.read() {
        if !ctx.suppresses_map_touch(ev.pos, *screen.get(), &config) {
            writer.write(MapMoveRequested { pos: ev.pos });
        }
    }
}

pub fn on_map_start(
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    mut backpack: ResMut<Backpack>,
) {
    if !ctx.is_enabled() {
        return;
    }
    let backpack = &mut *backpack;
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.redraw(&mut backpack.slot_bindings, &backpack.slots, &mut scene, true);
}

/// 离开地图时摘掉图元，回来时由 on_map_start 重画
pub fn on_map_exit(
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
) {
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.hide_panel(&mut scene);
}

pub fn on_item_screen_open(
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    config: Res<ItemSlotConfig>,
) {
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.open_item_screen(config.slot_count, assets.sheet, &mut scene);
}

pub fn on_item_screen_close(
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
) {
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.close_item_screen(&mut scene);
}

pub fn on_message_opened(
    mut reader: EventReader<MessageOpened>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    screen: Res<State<HostScreen>>,
) {
    if reader.read().count() == 0 || !screen.get().is_map() || !ctx.is_enabled() {
        return;
    }
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.hide_panel(&mut scene);
}

pub fn on_message_closed(
    mut reader: EventReader<MessageClosed>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    mut backpack: ResMut<Backpack>,
    screen: Res<State<HostScreen>>,
) {
    if reader.read().count() == 0 || !screen.get().is_map() || !ctx.is_enabled() {
        return;
    }
    let backpack = &mut *backpack;
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.redraw(&mut backpack.slot_bindings, &backpack.slots, &mut scene, true);
}

/// 物品列表的行如果绑定了槽位，在行上补上编号
pub fn decorate_item_rows(
    mut reader: EventReader<ItemRowDrawn>,
    backpack: Res<Backpack>,
    config: Res<ItemSlotConfig>,
    mut window: ResMut<ItemListWindow>,
) {
    let Some(bindings) = &backpack.slot_bindings else {
        reader.clear();
        return;
    };
    for ev in reader.read() {
        let badge = bindings.slot_of(&ev.item_id).map(|slot| RowBadge {
            slot,
            font_size: config.item_list_font_size,
        });
        if let Some(row) = window.rows.get_mut(ev.row) {
            row.badge = badge;
        }
    }
}

/// 宿主用完物品后刷新数量；只有用掉的是已绑定物品时才重画
pub fn on_item_used(
    mut reader: EventReader<ItemUsed>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    mut backpack: ResMut<Backpack>,
    screen: Res<State<HostScreen>>,
) {
    let backpack = &mut *backpack;
    let mut touched = false;
    for ev in reader.read() {
        let slot = backpack
            .slot_bindings
            .as_ref()
            .and_then(|b| b.slot_of(&ev.id));
        if let Some(slot) = slot {
            debug!("slot {slot}: {} used, {} left", ev.id, ev.left);
            touched = true;
        }
    }
    if !touched || !ctx.is_enabled() {
        return;
    }
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.redraw(
        &mut backpack.slot_bindings,
        &backpack.slots,
        &mut scene,
        screen.get().is_map(),
    );
}

pub fn on_save_loaded(
    mut reader: EventReader<SaveLoaded>,
    mut ctx: ResMut<ItemSlotContext>,
    mut commands: Commands,
    assets: Res<OverlayAssets>,
    mut backpack: ResMut<Backpack>,
    screen: Res<State<HostScreen>>,
) {
    if reader.read().count() == 0 {
        return;
    }
    let backpack = &mut *backpack;
    let mut scene = BevyScene::new(&mut commands, &assets);
    ctx.reconcile_after_load(
        &mut backpack.slot_bindings,
        &backpack.slots,
        &mut scene,
        screen.get().is_map(),
    );
}

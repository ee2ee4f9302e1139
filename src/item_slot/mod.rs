//! 地图上的物品栏
//!
//! 在物品画面按数字键（或点数字按钮）把高亮的物品放进对应槽位，
//! 在地图上点击槽位选中它。绑定表存放在 [`Backpack`] 里跟随存档。
//!
//! [`Backpack`]: crate::inventory::components::Backpack

pub mod assign;
pub mod binding;
pub mod button_row;
pub mod config;
pub mod context;
pub mod hooks;
pub mod icon;
pub mod panel;
pub mod router;
pub mod scene;
pub mod slot;

use bevy::prelude::*;

use crate::core::states::{AppState, HostScreen};
use crate::core::FrameSet;
use crate::inventory::ItemListSet;
use config::ItemSlotConfig;
use context::ItemSlotContext;
use hooks::*;
use icon::OverlayAssets;

pub struct ItemSlotPlugin;

impl Plugin for ItemSlotPlugin {
    fn build(&self, app: &mut App) {
        // 测试里可以预先塞好配置
        if !app.world().contains_resource::<ItemSlotConfig>() {
            app.insert_resource(ItemSlotConfig::load_or_default(config::CONFIG_PATH));
        }

        app.init_resource::<ItemSlotContext>()
            .init_resource::<OverlayAssets>()
            .add_event::<ItemSlotCommand>()
            .add_systems(Startup, icon::load_overlay_assets)
            .add_systems(OnEnter(HostScreen::Map), on_map_start)
            .add_systems(OnExit(HostScreen::Map), on_map_exit)
            .add_systems(OnEnter(HostScreen::ItemList), on_item_screen_open)
            .add_systems(OnExit(HostScreen::ItemList), on_item_screen_close)
            .add_systems(
                Update,
                (
                    (
                        run_commands,
                        route_input,
                        arbitrate_map_touch,
                        on_message_opened,
                        on_message_closed,
                    )
                        .chain()
                        .in_set(FrameSet::Route),
                    (on_item_used, on_save_loaded).after(ItemListSet::Rebuild),
                    decorate_item_rows.in_set(ItemListSet::Decorate),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::event::Events;
    use bevy::state::app::StatesPlugin;

    use super::*;
    use super::scene::PrimitiveKind;
    use crate::core::events::{MapMoveRequested, MessageClosed, MessageOpened, SimulatedInput};
    use crate::core::CorePlugin;
    use crate::data::schema::{ItemEntry, ItemList};
    use crate::data::ItemAssets;
    use crate::inventory::components::{Backpack, ItemListWindow};
    use crate::inventory::InventoryPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_resource(ItemSlotConfig::default())
            .init_resource::<ItemAssets>()
            .init_resource::<Assets<ItemList>>()
            .add_plugins((CorePlugin, InventoryPlugin, ItemSlotPlugin));
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::InGame);
        app.update();

        let mut backpack = app.world_mut().resource_mut::<Backpack>();
        for (id, icon) in [("potion", 176), ("ether", 178)] {
            backpack.give(
                &ItemEntry {
                    id: id.into(),
                    name: id.into(),
                    icon_index: icon,
                    item_type: "potion".into(),
                    ..Default::default()
                },
                3,
            );
        }
        app
    }

    fn primitives(app: &mut App, kind: PrimitiveKind) -> usize {
        let mut q = app.world_mut().query::<&PrimitiveKind>();
        q.iter(app.world()).filter(|k| **k == kind).count()
    }

    fn go(app: &mut App, screen: HostScreen) {
        app.world_mut().resource_mut::<NextState<HostScreen>>().set(screen);
        app.update();
    }

    fn slot_corner(app: &App, id: u8) -> Vec2 {
        let ctx = app.world().resource::<ItemSlotContext>();
        ctx.panel().and_then(|p| p.slot(id)).unwrap().rect().min.as_vec2()
    }

    #[test]
    fn activate_draws_panel_on_map() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();

        assert!(app.world().resource::<ItemSlotContext>().is_enabled());
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), 5);
        assert_eq!(primitives(&mut app, PrimitiveKind::Label), 5);
        let backpack = app.world().resource::<Backpack>();
        assert_eq!(backpack.slot_bindings.as_ref().map(|b| b.len()), Some(5));
    }

    #[test]
    fn digit_on_item_screen_binds_and_badges_row() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();

        go(&mut app, HostScreen::ItemList);
        // 离开地图后面板图元被摘掉，数字按钮出现
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), 5);
        assert_eq!(primitives(&mut app, PrimitiveKind::Label), 5);

        app.world_mut().resource_mut::<ItemListWindow>().index = 1;
        app.world_mut().send_event(SimulatedInput::Digit(2));
        app.update();

        let backpack = app.world().resource::<Backpack>();
        let bindings = backpack.slot_bindings.as_ref().unwrap();
        assert_eq!(bindings.slot_of("ether"), Some(2));
        let window = app.world().resource::<ItemListWindow>();
        assert_eq!(window.rows[1].badge.map(|b| b.slot), Some(2));
        assert!(window.rows[0].badge.is_none());

        go(&mut app, HostScreen::Map);
        assert_eq!(primitives(&mut app, PrimitiveKind::Icon), 1);
        assert_eq!(primitives(&mut app, PrimitiveKind::Quantity), 1);
    }

    #[test]
    fn clicks_on_slots_do_not_move_the_player() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();

        let inside = slot_corner(&app, 3);
        app.world_mut().send_event(SimulatedInput::Click(inside));
        app.update();
        assert!(app.world().resource::<Events<MapMoveRequested>>().is_empty());
        let ctx = app.world().resource::<ItemSlotContext>();
        assert_eq!(ctx.panel().and_then(|p| p.selected()).map(|s| s.id()), Some(3));
        assert_eq!(primitives(&mut app, PrimitiveKind::Outline), 1);

        app.world_mut()
            .send_event(SimulatedInput::Click(Vec2::new(400.0, 100.0)));
        app.update();
        assert!(!app.world().resource::<Events<MapMoveRequested>>().is_empty());
    }

    #[test]
    fn message_window_hides_and_restores_panel() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();
        let drawn = primitives(&mut app, PrimitiveKind::Panel);

        app.world_mut().send_event(MessageOpened);
        app.update();
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), 0);
        assert!(app.world().resource::<ItemSlotContext>().is_enabled());

        app.world_mut().send_event(MessageClosed);
        app.update();
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), drawn);
    }

    #[test]
    fn message_window_off_map_leaves_panel_alone() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();
        go(&mut app, HostScreen::ItemList);
        // 只剩数字按钮
        let buttons = primitives(&mut app, PrimitiveKind::Panel);

        app.world_mut().send_event(MessageClosed);
        app.update();
        let ctx = app.world().resource::<ItemSlotContext>();
        assert!(!ctx.panel().unwrap().is_shown());
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), buttons);

        app.world_mut().send_event(MessageOpened);
        app.update();
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), buttons);
        assert!(app.world().resource::<ItemSlotContext>().is_enabled());
    }

    #[test]
    fn message_window_ignores_disabled_panel() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();
        app.world_mut().send_event(ItemSlotCommand::Hide);
        app.update();
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), 0);

        app.world_mut().send_event(MessageOpened);
        app.update();
        app.world_mut().send_event(MessageClosed);
        app.update();

        let ctx = app.world().resource::<ItemSlotContext>();
        assert!(!ctx.is_enabled());
        assert!(!ctx.panel().unwrap().is_shown());
        assert_eq!(primitives(&mut app, PrimitiveKind::Panel), 0);
    }

    #[test]
    fn using_the_selected_item_refreshes_quantity() {
        let mut app = app();
        app.world_mut().send_event(ItemSlotCommand::Activate);
        app.update();

        // 在物品画面把 potion 放进 1 号槽
        go(&mut app, HostScreen::ItemList);
        app.world_mut().send_event(SimulatedInput::Digit(1));
        app.update();
        go(&mut app, HostScreen::Map);

        let p = slot_corner(&app, 1);
        app.world_mut().send_event(SimulatedInput::Click(p));
        app.update();
        app.world_mut().send_event(ItemSlotCommand::UseSelected);
        app.update();

        assert_eq!(app.world().resource::<Backpack>().count_of("potion"), 2);
        let ctx = app.world().resource::<ItemSlotContext>();
        assert_eq!(ctx.current_bound_item_field("haveCount").as_deref(), Some("2"));
    }
}

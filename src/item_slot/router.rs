//! 每帧输入分发：数字键 → 绑定；点击 → 选中槽位 / 物品画面的数字按钮

use super::assign::assign;
use super::binding::{ItemRef, SlotBindings, SlotId};
use super::config::ItemSlotConfig;
use super::context::ItemSlotContext;
use super::panel::OwnedItems;
use super::scene::SceneGraph;
use crate::core::resources::FrameInput;
use crate::core::states::HostScreen;

/// 本帧分发需要的宿主信息
pub struct RouteEnv<'a> {
    pub screen: HostScreen,
    pub config: &'a ItemSlotConfig,
    /// 物品列表当前高亮的物品
    pub highlighted: Option<&'a ItemRef>,
    pub items: &'a dyn OwnedItems,
}

/// 分发结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RouteEffects {
    /// 绑定表有改动，物品列表需要重绘
    pub item_list_dirty: bool,
}

/// 先处理数字键，再处理点击；面板还没创建时整帧跳过
pub fn route_frame(
    ctx: &mut ItemSlotContext,
    input: &FrameInput,
    env: &RouteEnv,
    store: &mut Option<SlotBindings>,
    scene: &mut dyn SceneGraph,
) -> RouteEffects {
    let mut effects = RouteEffects::default();
    let Some(slot_count) = ctx.panel.as_ref().map(|p| p.slot_count()) else {
        return effects;
    };
    let on_item_screen = env.screen == HostScreen::ItemList;

    if on_item_screen {
        for &digit in &input.digits {
            if usize::from(digit) <= slot_count {
                effects.item_list_dirty |= set_from_list(store, digit, env);
            }
        }
    }

    if let Some(click) = input.click {
        if ctx.interactive_on(env.screen, env.config) {
            if let Some(panel) = &mut ctx.panel {
                if let Some(hit) = panel.hit_test(click) {
                    panel.select(hit);
                }
            }
            ctx.redraw(store, env.items, scene, env.screen.is_map());
        }

        if on_item_screen && ctx.enabled {
            let hit = ctx.buttons.as_ref().and_then(|b| b.hit_test(click));
            if let (Some(slot), Some(buttons)) = (hit, ctx.buttons.as_mut()) {
                effects.item_list_dirty |= set_from_list(store, slot, env);
                buttons.press(slot, scene, true);
            }
        }
    } else if input.released && on_item_screen {
        if let Some(buttons) = &mut ctx.buttons {
            buttons.release(scene, true);
        }
    }

    effects
}

fn set_from_list(store: &mut Option<SlotBindings>, slot: SlotId, env: &RouteEnv) -> bool {
    assign(store.as_mut(), slot, env.highlighted).changed()
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;
    use crate::item_slot::binding::item;
    use crate::item_slot::context::tests::activated;
    use crate::item_slot::icon::IconSheet;
    use crate::item_slot::panel::tests::Stock;
    use crate::item_slot::scene::RecordingScene;

    fn env<'a>(
        screen: HostScreen,
        config: &'a ItemSlotConfig,
        highlighted: Option<&'a ItemRef>,
        items: &'a Stock,
    ) -> RouteEnv<'a> {
        RouteEnv {
            screen,
            config,
            highlighted,
            items,
        }
    }

    fn digits(d: &[u8]) -> FrameInput {
        FrameInput {
            digits: d.to_vec(),
            ..Default::default()
        }
    }

    fn click(p: Vec2) -> FrameInput {
        FrameInput {
            click: Some(p),
            ..Default::default()
        }
    }

    fn corner(ctx: &ItemSlotContext, id: SlotId) -> Vec2 {
        ctx.panel().and_then(|p| p.slot(id)).unwrap().rect().min.as_vec2()
    }

    #[test]
    fn nothing_happens_before_activation() {
        let mut ctx = ItemSlotContext::default();
        let config = ItemSlotConfig::default();
        let stock = Stock::default();
        let potion = item("potion", 1);
        let mut store = Some(SlotBindings::with_slot_count(5));
        let mut scene = RecordingScene::default();

        let fx = route_frame(
            &mut ctx,
            &digits(&[1]),
            &env(HostScreen::ItemList, &config, Some(&potion), &stock),
            &mut store,
            &mut scene,
        );
        assert!(!fx.item_list_dirty);
        assert_eq!(store.as_ref().and_then(|b| b.slot_of("potion")), None);
    }

    #[test]
    fn digits_bind_only_on_item_screen() {
        let stock = Stock::default().with("potion", 2);
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        let config = ItemSlotConfig::default();
        let potion = item("potion", 1);

        let fx = route_frame(
            &mut ctx,
            &digits(&[2]),
            &env(HostScreen::Map, &config, Some(&potion), &stock),
            &mut store,
            &mut scene,
        );
        assert!(!fx.item_list_dirty);

        let fx = route_frame(
            &mut ctx,
            &digits(&[2]),
            &env(HostScreen::ItemList, &config, Some(&potion), &stock),
            &mut store,
            &mut scene,
        );
        assert!(fx.item_list_dirty);
        assert_eq!(store.as_ref().and_then(|b| b.slot_of("potion")), Some(2));

        // 超出槽位数的数字忽略
        let fx = route_frame(
            &mut ctx,
            &digits(&[9]),
            &env(HostScreen::ItemList, &config, Some(&potion), &stock),
            &mut store,
            &mut scene,
        );
        assert!(!fx.item_list_dirty);
    }

    #[test]
    fn same_digit_twice_in_one_frame_toggles_back() {
        let stock = Stock::default().with("potion", 2);
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        let config = ItemSlotConfig::default();
        let potion = item("potion", 1);

        route_frame(
            &mut ctx,
            &digits(&[4, 4]),
            &env(HostScreen::ItemList, &config, Some(&potion), &stock),
            &mut store,
            &mut scene,
        );
        assert_eq!(store.as_ref().and_then(|b| b.slot_of("potion")), None);
    }

    #[test]
    fn map_click_selects_exactly_one_slot() {
        let stock = Stock::default();
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        let config = ItemSlotConfig::default();

        for id in [3, 5] {
            let p = corner(&ctx, id);
            route_frame(
                &mut ctx,
                &click(p),
                &env(HostScreen::Map, &config, None, &stock),
                &mut store,
                &mut scene,
            );
        }
        let selected: Vec<_> = ctx
            .panel()
            .unwrap()
            .slots()
            .iter()
            .filter(|s| s.is_selected())
            .map(|s| s.id())
            .collect();
        assert_eq!(selected, vec![5]);
    }

    #[test]
    fn click_is_ignored_when_disabled() {
        let stock = Stock::default();
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        ctx.hide(&mut scene);
        let config = ItemSlotConfig::default();

        let p = corner(&ctx, 1);
        route_frame(
            &mut ctx,
            &click(p),
            &env(HostScreen::Map, &config, None, &stock),
            &mut store,
            &mut scene,
        );
        assert!(ctx.panel().unwrap().selected().is_none());
        assert!(scene.live.is_empty());
    }

    #[test]
    fn map_only_policy_blocks_selection_elsewhere() {
        let stock = Stock::default();
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        let p = corner(&ctx, 2);

        let strict = ItemSlotConfig::default();
        route_frame(
            &mut ctx,
            &click(p),
            &env(HostScreen::Menu, &strict, None, &stock),
            &mut store,
            &mut scene,
        );
        assert!(ctx.panel().unwrap().selected().is_none());

        let global = ItemSlotConfig {
            restrict_interaction_to_map_screen: false,
            ..Default::default()
        };
        route_frame(
            &mut ctx,
            &click(p),
            &env(HostScreen::Menu, &global, None, &stock),
            &mut store,
            &mut scene,
        );
        assert_eq!(ctx.panel().unwrap().selected().map(|s| s.id()), Some(2));
    }

    #[test]
    fn number_button_binds_and_flashes_until_release() {
        let stock = Stock::default().with("ether", 1);
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        ctx.open_item_screen(5, IconSheet::default(), &mut scene);
        let config = ItemSlotConfig::default();
        let ether = item("ether", 2);

        let p = ctx.buttons().unwrap().rects()[2].min.as_vec2();
        let fx = route_frame(
            &mut ctx,
            &click(p),
            &env(HostScreen::ItemList, &config, Some(&ether), &stock),
            &mut store,
            &mut scene,
        );
        assert!(fx.item_list_dirty);
        assert_eq!(store.as_ref().and_then(|b| b.slot_of("ether")), Some(3));
        assert_eq!(ctx.buttons().unwrap().flashing(), Some(3));

        let release = FrameInput {
            released: true,
            ..Default::default()
        };
        route_frame(
            &mut ctx,
            &release,
            &env(HostScreen::ItemList, &config, Some(&ether), &stock),
            &mut store,
            &mut scene,
        );
        assert_eq!(ctx.buttons().unwrap().flashing(), None);
    }

    #[test]
    fn touches_on_visible_slots_are_suppressed() {
        let stock = Stock::default();
        let mut store = None;
        let mut scene = RecordingScene::default();
        let mut ctx = activated(5, &mut store, &stock, &mut scene);
        let config = ItemSlotConfig::default();

        let inside = corner(&ctx, 1);
        let outside = Vec2::new(5.0, 5.0);
        assert!(ctx.suppresses_map_touch(inside, HostScreen::Map, &config));
        assert!(!ctx.suppresses_map_touch(outside, HostScreen::Map, &config));

        ctx.hide(&mut scene);
        assert!(!ctx.suppresses_map_touch(inside, HostScreen::Map, &config));
    }
}

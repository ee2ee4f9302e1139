pub mod components;
pub mod events;
pub mod save;
mod systems;

use bevy::prelude::*;
use crate::core::states::{AppState, HostScreen};
use crate::core::FrameSet;
use components::*;
use events::*;
use systems::*;

/// 物品列表重绘的顺序：重建行 → 插件追加编号 → 打印
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemListSet {
    Rebuild,
    Decorate,
    Print,
}

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(Backpack::with_capacity(30))
            .init_resource::<ItemListWindow>()
            .init_resource::<save::SavePath>()
            .add_event::<GiveItemEvent>()
            .add_event::<ListInventoryEvent>()
            .add_event::<UseItemEvent>()
            .add_event::<ItemUsed>()
            .add_event::<ItemRowDrawn>()
            .add_event::<SaveRequested>()
            .add_event::<LoadRequested>()
            .add_event::<SaveLoaded>()
            .configure_sets(
                Update,
                (ItemListSet::Rebuild, ItemListSet::Decorate, ItemListSet::Print)
                    .chain()
                    .after(FrameSet::Route),
            )
            .add_systems(OnEnter(HostScreen::ItemList), open_item_list)
            .add_systems(
                Update,
                (
                    (give_item, use_item, save::save_game, save::load_game)
                        .after(FrameSet::Route)
                        .before(ItemListSet::Rebuild),
                    refresh_item_list.in_set(ItemListSet::Rebuild),
                    print_item_list.in_set(ItemListSet::Print),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

use bevy::prelude::*;
use bevy::window::WindowResolution;

mod core;
mod data;
mod interface;
mod inventory;
mod item_slot;

use crate::core::CorePlugin;
use crate::core::resources::ScreenMetrics;
use interface::debug_cli::DebugCliPlugin;
use inventory::InventoryPlugin;
use item_slot::ItemSlotPlugin;
use crate::core::states;

fn main() {
    let metrics = ScreenMetrics::default();
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Item Slot".into(),
                // 窗口尺寸与布局计算使用的屏幕尺寸一致
                resolution: WindowResolution::new(metrics.width as f32, metrics.height as f32),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(metrics)
        .add_plugins(CorePlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(ItemSlotPlugin)
        .add_plugins(DebugCliPlugin)
        .add_systems(Startup, spawn_camera)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}

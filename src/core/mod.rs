use bevy::prelude::*;

pub mod states;
pub mod events;
pub mod resources;
pub mod input;
pub mod host;

/// 每帧的执行顺序：收集输入 → 插件路由 → 宿主默认处理
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Gather,
    Route,
    Host,
}

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::{AppState, HostScreen};

        // 插件首次载入时，插入初始 State
        app
            .init_state::<AppState>()
            .init_state::<HostScreen>()
            .add_event::<events::LogEvent>()
            .add_event::<events::MessageOpened>()
            .add_event::<events::MessageClosed>()
            .add_event::<events::MapTouchAttempt>()
            .add_event::<events::MapMoveRequested>()
            .add_event::<events::SimulatedInput>()
            .init_resource::<resources::ScreenMetrics>()
            .init_resource::<resources::MessageWindow>()
            .init_resource::<resources::FrameInput>()
            .configure_sets(
                Update,
                (FrameSet::Gather, FrameSet::Route, FrameSet::Host).chain(),
            )
            .add_systems(Startup, events::hello_world)
            .add_systems(Update, input::gather_frame_input.in_set(FrameSet::Gather))
            .add_systems(
                Update,
                host::emit_map_touch
                    .in_set(FrameSet::Gather)
                    .after(input::gather_frame_input)
                    .run_if(in_state(HostScreen::Map)),
            )
            .add_systems(Update, host::move_player.in_set(FrameSet::Host));
    }
}

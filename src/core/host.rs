//! 宿主的地图画面替身：点击地图 → 询问插件 → 移动

use bevy::prelude::*;

use super::events::{LogEvent, MapMoveRequested, MapTouchAttempt};
use super::resources::{FrameInput, MessageWindow};

/// 地图上的点击先变成 MapTouchAttempt，由插件决定是否放行
pub fn emit_map_touch(
    input: Res<FrameInput>,
    message: Res<MessageWindow>,
    mut writer: EventWriter<MapTouchAttempt>,
) {
    if message.open {
        return;
    }
    if let Some(pos) = input.click {
        writer.write(MapTouchAttempt { pos });
    }
}

/// 宿主的点击移动
pub fn move_player(mut reader: EventReader<MapMoveRequested>, mut log: EventWriter<LogEvent>) {
    for ev in reader.read() {
        log.write(LogEvent(format!(
            "角色移动到 ({}, {})",
            ev.pos.x as i32, ev.pos.y as i32
        )));
    }
}

use bevy::prelude::*;

/// 打印到控制台的一行文字
#[derive(Event)]
pub struct LogEvent(pub String);

pub fn hello_world(mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent("Item slot demo ready, type `help`".into()));
}

/* ----------------------- 宿主暴露给插件的钩子 ----------------------- */

/// 消息窗口打开
#[derive(Event, Debug, Clone, Copy)]
pub struct MessageOpened;

/// 消息窗口关闭
#[derive(Event, Debug, Clone, Copy)]
pub struct MessageClosed;

/// 地图被点击，宿主准备执行点击移动
#[derive(Event, Debug, Clone, Copy)]
pub struct MapTouchAttempt {
    pub pos: Vec2,
}

/// 通过仲裁后真正交给宿主的移动请求
#[derive(Event, Debug, Clone, Copy)]
pub struct MapMoveRequested {
    pub pos: Vec2,
}

/// 模拟输入（调试终端用）
#[derive(Event, Debug, Clone, Copy)]
pub enum SimulatedInput {
    Digit(u8),
    Click(Vec2),
    Release,
}

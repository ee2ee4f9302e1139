//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印
//!
//! 用来在没有真实输入设备的情况下驱动宿主：切画面、模拟按键 / 点击、
//! 开关消息窗口、执行物品栏插件命令。

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::num::NonZero;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::events::{LogEvent, MessageClosed, MessageOpened, SimulatedInput};
use crate::core::resources::MessageWindow;
use crate::core::states::{AppState, HostScreen};
use crate::data::{ItemAssets, schema::ItemList};
use crate::inventory::components::{Backpack, ItemListWindow};
use crate::inventory::events::{
    GiveItemEvent, ListInventoryEvent, LoadRequested, SaveRequested, UseItemEvent,
};
use crate::item_slot::context::ItemSlotContext;
use crate::item_slot::hooks::ItemSlotCommand;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

const HELP: &str = "命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  items [token]          列出物品 / 用 id / uuid / 名称 查询单个物品
  give <id> [count]      给予物品
  inventory              查看物品列表
  use <id>               使用物品
  screen <map|items|menu> 切换画面
  cursor <row>           物品列表光标移到某行
  key <1-9>              模拟按下数字键
  click <x> <y>          模拟左键点击
  release                模拟左键松开
  msg <open|close>       打开 / 关闭消息窗口
  slot <create|show|hide|update|use>  物品栏插件命令
  current <field>        选中槽位物品的字段 (id/name/iconIndex/haveCount)
  qty                    选中槽位物品的持有数
  save / load            存档 / 读档
";

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if !line.is_empty() {
                        let mut buf = buffer.lock().expect("cli buffer poisoned");
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands
                    .after(read_stdin)
                    .before(crate::core::FrameSet::Gather)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give { id: String, count: u32 },
    Inventory,
    Use(String),
    Screen(HostScreen),
    Cursor(usize),
    Key(u8),
    Click(Vec2),
    Release,
    Message(bool),
    Slot(ItemSlotCommand),
    Current(String),
    Quantity,
    Save,
    Load,
    Unsupported(String),
}

/// 命令要写的所有事件
#[derive(SystemParam)]
struct CliWriters<'w> {
    app_exit: EventWriter<'w, AppExit>,
    log: EventWriter<'w, LogEvent>,
    give: EventWriter<'w, GiveItemEvent>,
    list: EventWriter<'w, ListInventoryEvent>,
    use_item: EventWriter<'w, UseItemEvent>,
    input: EventWriter<'w, SimulatedInput>,
    msg_open: EventWriter<'w, MessageOpened>,
    msg_close: EventWriter<'w, MessageClosed>,
    slot: EventWriter<'w, ItemSlotCommand>,
    save: EventWriter<'w, SaveRequested>,
    load: EventWriter<'w, LoadRequested>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let mut buffer = CLI_BUFFER.lock().expect("cli buffer poisoned");
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut out: CliWriters,
    state: Res<State<AppState>>,
    screen: Res<State<HostScreen>>,
    mut next_screen: ResMut<NextState<HostScreen>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    mut window: ResMut<ItemListWindow>,
    mut message: ResMut<MessageWindow>,
    ctx: Res<ItemSlotContext>,
    backpack: Res<Backpack>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                out.log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                let cnt = item_assets.get(&lists).map_or(0, |list| list.items.len());
                let bound = backpack
                    .slot_bindings
                    .as_ref()
                    .map_or(0, |b| b.iter().filter(|(_, it)| it.is_some()).count());
                out.log.write(LogEvent(format!(
                    "State: {:?}, Screen: {:?}, Items Loaded: {}, Slot panel: {}, Bound slots: {}",
                    state.get(),
                    screen.get(),
                    cnt,
                    if ctx.is_enabled() { "on" } else { "off" },
                    bound
                )));
            }

            Command::Exit => {
                out.log.write(LogEvent("Bye~".into()));
                out.app_exit.write(AppExit::Error(NonZero::<u8>::MIN));
            }

            Command::Items(token) => {
                let Some(list) = item_assets.get(&lists) else {
                    continue;
                };
                match token {
                    None => {
                        // 全部列出
                        for entry in &list.items {
                            let uuid = uuid_from_id(&entry.id);
                            out.log.write(LogEvent(format!(
                                "{} | {} | {}",
                                uuid, entry.id, entry.name
                            )));
                        }
                    }
                    Some(t) => {
                        // 按三种字段模糊匹配
                        let t_low = t.to_lowercase();
                        if let Some(e) = list.items.iter().find(|e| {
                            e.id.eq_ignore_ascii_case(&t_low)
                                || e.name.eq_ignore_ascii_case(&t_low)
                                || uuid_from_id(&e.id).to_string() == t_low
                        }) {
                            let uuid = uuid_from_id(&e.id);
                            out.log.write(LogEvent(format!(
                                "==================================================
UUID : {uuid}
ID   : {}
Name : {}
Icon : {}
Type : {}
Heal : {}
==================================================",
                                e.id, e.name, e.icon_index, e.item_type, e.heal
                            )));
                        } else {
                            out.log.write(LogEvent("未找到匹配物品".into()));
                        }
                    }
                }
            }

            Command::Give { id, count } => {
                out.give.write(GiveItemEvent { id, count });
            }

            Command::Inventory => {
                out.list.write(ListInventoryEvent);
            }

            Command::Use(id) => {
                out.use_item.write(UseItemEvent { id });
            }

            Command::Screen(next) => {
                next_screen.set(next);
            }

            Command::Cursor(row) => {
                if row < window.rows.len() {
                    window.index = row;
                    out.list.write(ListInventoryEvent);
                } else {
                    out.log.write(LogEvent(format!("没有第 {row} 行")));
                }
            }

            Command::Key(d) => {
                out.input.write(SimulatedInput::Digit(d));
            }

            Command::Click(pos) => {
                out.input.write(SimulatedInput::Click(pos));
            }

            Command::Release => {
                out.input.write(SimulatedInput::Release);
            }

            Command::Message(open) => {
                message.open = open;
                if open {
                    out.msg_open.write(MessageOpened);
                } else {
                    out.msg_close.write(MessageClosed);
                }
            }

            Command::Slot(cmd) => {
                out.slot.write(cmd);
            }

            Command::Current(field) => {
                let value = ctx.current_bound_item_field(&field).unwrap_or_default();
                out.log.write(LogEvent(format!("{field} = {value:?}")));
            }

            Command::Quantity => {
                let qty = ctx.current_bound_quantity(&backpack.slots);
                out.log.write(LogEvent(format!("持有数: {qty}")));
            }

            Command::Save => {
                out.save.write(SaveRequested);
            }

            Command::Load => {
                out.load.write(LoadRequested);
            }

            Command::Unsupported(cmd) => {
                out.log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count: cnt }
        }
        "inventory" | "inv" => Command::Inventory,
        "use" => Command::Use(parts.next().unwrap_or("").to_string()),
        "screen" => match parts.next().and_then(HostScreen::parse) {
            Some(s) => Command::Screen(s),
            None => Command::Unsupported(input.into()),
        },
        "cursor" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(row) => Command::Cursor(row),
            None => Command::Unsupported(input.into()),
        },
        "key" => match parts.next().and_then(|s| s.parse::<u8>().ok()) {
            Some(d @ 1..=9) => Command::Key(d),
            _ => Command::Unsupported(input.into()),
        },
        "click" => {
            let x = parts.next().and_then(|s| s.parse::<f32>().ok());
            let y = parts.next().and_then(|s| s.parse::<f32>().ok());
            match (x, y) {
                (Some(x), Some(y)) => Command::Click(Vec2::new(x, y)),
                _ => Command::Unsupported(input.into()),
            }
        }
        "release" => Command::Release,
        "msg" => match parts.next() {
            Some("open") => Command::Message(true),
            Some("close") => Command::Message(false),
            _ => Command::Unsupported(input.into()),
        },
        "slot" => match parts.next() {
            Some("create") | Some("activate") => Command::Slot(ItemSlotCommand::Activate),
            Some("show") => Command::Slot(ItemSlotCommand::Show),
            Some("hide") => Command::Slot(ItemSlotCommand::Hide),
            Some("update") | Some("refresh") => Command::Slot(ItemSlotCommand::Refresh),
            Some("use") => Command::Slot(ItemSlotCommand::UseSelected),
            _ => Command::Unsupported(input.into()),
        },
        "current" => Command::Current(parts.next().unwrap_or("id").to_string()),
        "qty" => Command::Quantity,
        "save" => Command::Save,
        "load" => Command::Load,
        other => Command::Unsupported(other.into()),
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slot_commands() {
        assert_eq!(parse_command("slot create"), Command::Slot(ItemSlotCommand::Activate));
        assert_eq!(parse_command("slot update"), Command::Slot(ItemSlotCommand::Refresh));
        assert_eq!(parse_command("slot use"), Command::Slot(ItemSlotCommand::UseSelected));
        assert_eq!(parse_command("slot explode"), Command::Unsupported("slot explode".into()));
    }

    #[test]
    fn parses_simulated_input() {
        assert_eq!(parse_command("key 3"), Command::Key(3));
        assert_eq!(parse_command("key 0"), Command::Unsupported("key 0".into()));
        assert_eq!(parse_command("click 120 560"), Command::Click(Vec2::new(120.0, 560.0)));
        assert_eq!(parse_command("screen items"), Command::Screen(HostScreen::ItemList));
        assert_eq!(parse_command("msg open"), Command::Message(true));
    }

    #[test]
    fn give_defaults_to_one() {
        assert_eq!(
            parse_command("give potion"),
            Command::Give { id: "potion".into(), count: 1 }
        );
    }

    #[test]
    fn uuid_is_stable() {
        assert_eq!(uuid_from_id("potion"), uuid_from_id("potion"));
        assert_ne!(uuid_from_id("potion"), uuid_from_id("ether"));
    }
}

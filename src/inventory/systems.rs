use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::data::{ItemAssets, schema::ItemList};
use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UseItemError {
    #[error("没有持有物品 {0}")]
    NotOwned(String),
    #[error("{0} 无法使用")]
    NotUsable(String),
}

/// 使用效果的文字描述，以及是否消耗
fn use_effect(stack: &ItemStack) -> Result<(String, bool), UseItemError> {
    let item = &stack.proto;
    // 根据物品类型执行不同的使用效果
    match item.item_type.as_str() {
        "potion" if item.heal > 0 => Ok((
            format!("使用 {}，全队恢复 {} 点生命值", item.name, item.heal),
            true,
        )),
        "potion" => Ok((format!("使用 {}，但没有任何效果", item.name), true)),
        "scroll" => Ok((format!("使用 {}，获得临时增益效果", item.name), true)),
        // 钥匙不消耗
        "key" => Ok((format!("使用 {}，但这里没有门可以开启", item.name), false)),
        _ => Err(UseItemError::NotUsable(item.name.clone())),
    }
}

/// 宿主标准使用流程：对全队使用一次，返回剩余数量
pub fn apply_use(backpack: &mut Backpack, id: &str) -> Result<(String, u32), UseItemError> {
    let stack = backpack
        .stacks()
        .find(|s| s.proto.id == id)
        .ok_or_else(|| UseItemError::NotOwned(id.to_string()))?;
    let (message, consumed) = use_effect(stack)?;
    let left = if consumed {
        backpack.consume_one(id).unwrap_or(0)
    } else {
        backpack.count_of(id)
    };
    Ok((message, left))
}

/// 处理"give"——往背包里塞 ItemStack
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut backpack: ResMut<Backpack>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    mut log: EventWriter<LogEvent>,
) {
    let Some(list) = item_assets.get(&lists) else {
        return;
    };

    for ev in ev_give.read() {
        if let Some(proto) = list.find(&ev.id) {
            if backpack.give(proto, ev.count) {
                log.write(LogEvent(format!("获得 {} ×{}", proto.name, ev.count)));
            } else {
                warn!("背包已满，无法获得 {}", proto.name);
            }
        } else {
            log.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
        }
    }
}

/// 重建物品列表，每画一行发一次 ItemRowDrawn
pub fn refresh_item_list(
    mut ev_list: EventReader<ListInventoryEvent>,
    backpack: Res<Backpack>,
    mut window: ResMut<ItemListWindow>,
    mut row_drawn: EventWriter<ItemRowDrawn>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    window.rebuild(&backpack);
    for (row, r) in window.rows.iter().enumerate() {
        row_drawn.write(ItemRowDrawn {
            row,
            item_id: r.item.id.clone(),
        });
    }
}

/// 打印物品列表（行尾的槽位编号由插件补上）
pub fn print_item_list(mut ev_row: EventReader<ItemRowDrawn>, window: Res<ItemListWindow>) {
    if ev_row.is_empty() {
        return;
    }
    ev_row.clear();

    if window.rows.is_empty() {
        println!("  (empty)");
        return;
    }
    for (idx, row) in window.rows.iter().enumerate() {
        let cursor = if idx == window.index { ">" } else { " " };
        let badge = row
            .badge
            .map(|b| format!("  [{}]", b.slot))
            .unwrap_or_default();
        println!(
            "{cursor}[{idx}] {} ×{} (id={}){badge}",
            row.item.name, row.item.have_count, row.item.id
        );
    }
}

/// 使用物品
pub fn use_item(
    mut ev_use: EventReader<UseItemEvent>,
    mut backpack: ResMut<Backpack>,
    mut used: EventWriter<ItemUsed>,
    mut log_event: EventWriter<LogEvent>,
) {
    for ev in ev_use.read() {
        match apply_use(&mut backpack, &ev.id) {
            Ok((message, left)) => {
                log_event.write(LogEvent(message));
                used.write(ItemUsed {
                    id: ev.id.clone(),
                    left,
                });
            }
            Err(e) => {
                log_event.write(LogEvent(e.to_string()));
            }
        }
    }
}

/// 进入物品画面时画一次列表
pub fn open_item_list(mut writer: EventWriter<ListInventoryEvent>) {
    writer.write(ListInventoryEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemEntry;

    fn backpack() -> Backpack {
        let mut bp = Backpack::with_capacity(4);
        for (id, kind, heal) in [("potion", "potion", 10), ("old_key", "key", 0), ("sword", "weapon", 0)] {
            bp.give(
                &ItemEntry {
                    id: id.into(),
                    name: id.into(),
                    item_type: kind.into(),
                    heal,
                    ..Default::default()
                },
                2,
            );
        }
        bp
    }

    #[test]
    fn potions_are_consumed() {
        let mut bp = backpack();
        let (_, left) = apply_use(&mut bp, "potion").unwrap();
        assert_eq!(left, 1);
        apply_use(&mut bp, "potion").unwrap();
        assert_eq!(bp.count_of("potion"), 0);
        assert_eq!(
            apply_use(&mut bp, "potion"),
            Err(UseItemError::NotOwned("potion".into()))
        );
    }

    #[test]
    fn keys_are_kept_and_weapons_refused() {
        let mut bp = backpack();
        assert_eq!(apply_use(&mut bp, "old_key").map(|(_, left)| left), Ok(2));
        assert_eq!(
            apply_use(&mut bp, "sword"),
            Err(UseItemError::NotUsable("sword".into()))
        );
        assert_eq!(bp.count_of("sword"), 2);
    }
}

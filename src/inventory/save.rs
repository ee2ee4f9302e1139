//! 队伍物品容器的存档 / 读档（JSON）

use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::prelude::*;

use super::components::Backpack;
use super::events::{LoadRequested, SaveLoaded, SaveRequested};
use crate::core::events::LogEvent;

/// 存档位置
#[derive(Resource, Debug, Clone)]
pub struct SavePath(pub PathBuf);

impl Default for SavePath {
    fn default() -> Self {
        Self(PathBuf::from("save/file1.json"))
    }
}

pub fn write_save(path: &Path, backpack: &Backpack) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(backpack).context("serializing backpack")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn read_save(path: &Path) -> anyhow::Result<Backpack> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let backpack = serde_json::from_str(&json).context("parsing save data")?;
    Ok(backpack)
}

pub fn save_game(
    mut reader: EventReader<SaveRequested>,
    path: Res<SavePath>,
    backpack: Res<Backpack>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in reader.read() {
        match write_save(&path.0, &backpack) {
            Ok(()) => log.write(LogEvent(format!("已存档 → {}", path.0.display()))),
            Err(e) => log.write(LogEvent(format!("存档失败: {e:#}"))),
        };
    }
}

pub fn load_game(
    mut reader: EventReader<LoadRequested>,
    path: Res<SavePath>,
    mut backpack: ResMut<Backpack>,
    mut loaded: EventWriter<SaveLoaded>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in reader.read() {
        match read_save(&path.0) {
            Ok(data) => {
                *backpack = data;
                log.write(LogEvent(format!("已读档 ← {}", path.0.display())));
                loaded.write(SaveLoaded);
            }
            Err(e) => {
                log.write(LogEvent(format!("读档失败: {e:#}")));
            }
        }
    }
}

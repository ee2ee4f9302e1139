//! 物品画面上的数字按钮：点一下等同于按对应数字键

use bevy::prelude::*;

use super::binding::SlotId;
use super::config::hex_to_color;
use super::icon::IconSheet;
use super::scene::{detach_all, Attached, Primitive, SceneGraph};

const ORIGIN: IVec2 = IVec2::new(10, 10);
const RADIUS: f32 = 10.0;
const FONT_SIZE: f32 = 24.0;
const IDLE_COLOR: u32 = 0x000000;
const FLASH_COLOR: u32 = 0xFFFFFF;
const ALPHA: f32 = 0.5;

#[derive(Debug)]
pub struct SetButtonRow {
    rects: Vec<IRect>,
    /// 按下未松开的按钮
    flashing: Option<SlotId>,
    attached: Vec<Attached>,
}

impl SetButtonRow {
    pub fn new(slot_count: usize, icons: IconSheet) -> Self {
        let size = icons.size();
        let pitch = (icons.icon_width as f32 * 1.5).floor() as i32;
        let rects = (0..slot_count as i32)
            .map(|i| {
                let min = ORIGIN + IVec2::new(i * pitch, 0);
                IRect::from_corners(min, min + size)
            })
            .collect();
        Self {
            rects,
            flashing: None,
            attached: Vec::new(),
        }
    }

    pub fn rects(&self) -> &[IRect] {
        &self.rects
    }

    pub fn flashing(&self) -> Option<SlotId> {
        self.flashing
    }

    pub fn hit_test(&self, point: Vec2) -> Option<SlotId> {
        self.rects
            .iter()
            .position(|r| {
                point.x >= r.min.x as f32
                    && point.x <= r.max.x as f32
                    && point.y >= r.min.y as f32
                    && point.y <= r.max.y as f32
            })
            .map(|i| i as SlotId + 1)
    }

    /// 只在物品画面绘制
    pub fn show(&mut self, scene: &mut dyn SceneGraph, on_item_screen: bool) {
        detach_all(scene, &mut self.attached);
        if !on_item_screen {
            return;
        }
        for (i, rect) in self.rects.iter().enumerate() {
            let id = i as SlotId + 1;
            let color = if self.flashing == Some(id) { FLASH_COLOR } else { IDLE_COLOR };
            let primitives = [
                Primitive::Panel {
                    rect: *rect,
                    color: hex_to_color(color, ALPHA),
                    radius: RADIUS,
                },
                Primitive::Label {
                    rect: *rect,
                    text: id.to_string(),
                    font_size: FONT_SIZE,
                },
            ];
            for p in primitives {
                let kind = p.kind();
                let entity = scene.attach(p);
                self.attached.push(Attached { kind, entity });
            }
        }
    }

    /// 按下：高亮到松开为止
    pub fn press(&mut self, id: SlotId, scene: &mut dyn SceneGraph, on_item_screen: bool) {
        self.flashing = Some(id);
        self.show(scene, on_item_screen);
    }

    pub fn release(&mut self, scene: &mut dyn SceneGraph, on_item_screen: bool) {
        if self.flashing.take().is_some() {
            self.show(scene, on_item_screen);
        }
    }

    pub fn hide(&mut self, scene: &mut dyn SceneGraph) {
        self.flashing = None;
        detach_all(scene, &mut self.attached);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_slot::scene::{PrimitiveKind, RecordingScene};

    fn panel_colors(scene: &RecordingScene) -> Vec<Color> {
        scene
            .live
            .iter()
            .filter_map(|(_, p)| match p {
                Primitive::Panel { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn buttons_start_at_ten_with_icon_pitch() {
        let row = SetButtonRow::new(3, IconSheet::default());
        assert_eq!(row.rects()[0], IRect::new(10, 10, 42, 42));
        assert_eq!(row.rects()[1], IRect::new(58, 10, 90, 42));
        assert_eq!(row.hit_test(Vec2::new(58.0, 10.0)), Some(2));
        assert_eq!(row.hit_test(Vec2::new(50.0, 20.0)), None);
    }

    #[test]
    fn press_flashes_until_release() {
        let mut row = SetButtonRow::new(3, IconSheet::default());
        let mut scene = RecordingScene::default();
        row.show(&mut scene, true);
        assert_eq!(scene.count(PrimitiveKind::Label), 3);

        row.press(2, &mut scene, true);
        let colors = panel_colors(&scene);
        assert_eq!(colors[1], hex_to_color(FLASH_COLOR, ALPHA));
        assert_eq!(colors[0], hex_to_color(IDLE_COLOR, ALPHA));

        row.release(&mut scene, true);
        assert!(row.flashing().is_none());
        assert!(panel_colors(&scene).iter().all(|c| *c == hex_to_color(IDLE_COLOR, ALPHA)));
    }

    #[test]
    fn nothing_drawn_off_item_screen() {
        let mut row = SetButtonRow::new(3, IconSheet::default());
        let mut scene = RecordingScene::default();
        row.show(&mut scene, false);
        assert!(scene.live.is_empty());
    }
}

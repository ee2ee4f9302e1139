use bevy::prelude::*;

use super::binding::{ItemRef, SlotId};
use super::config::{hex_to_color, ItemSlotConfig};
use super::icon::IconSheet;
use super::scene::{detach_all, Attached, Primitive, SceneGraph};

/// 数量显示上限
pub const MAX_DISPLAY_QUANTITY: u32 = 99;
/// 数量文字离右下角的距离
const QUANTITY_INSET: f32 = 5.0;

/// 槽位里显示的物品快照，每次 update 重新生成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundItemSnapshot {
    pub id: String,
    pub name: String,
    pub icon_index: u32,
    /// 实际持有数
    pub owned: u32,
    /// 画在槽位上的数量，最多 99
    pub display_quantity: u32,
}

impl BoundItemSnapshot {
    pub fn new(item: &ItemRef, owned: u32) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            icon_index: item.icon_index,
            owned,
            display_quantity: owned.min(MAX_DISPLAY_QUANTITY),
        }
    }
}

/// 所有槽位共用的外观参数
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStyle {
    pub background: Color,
    pub radius: f32,
    pub line_weight: f32,
    pub line_color: Color,
    pub line_margin: i32,
    pub font_size: f32,
    pub icons: IconSheet,
}

impl SlotStyle {
    pub fn from_config(config: &ItemSlotConfig, icons: IconSheet) -> Self {
        Self {
            background: hex_to_color(config.background_color, config.background_alpha),
            radius: config.corner_radius,
            line_weight: config.line_weight,
            line_color: hex_to_color(config.line_color, 1.0),
            line_margin: config.line_margin,
            font_size: config.slot_font_size,
            icons,
        }
    }
}

/// 单个槽位
#[derive(Debug)]
pub struct Slot {
    id: SlotId,
    rect: IRect,
    selected: bool,
    item: Option<BoundItemSnapshot>,
    /// 当前外观已经画在地图上
    drawn: bool,
    attached: Vec<Attached>,
}

impl Slot {
    pub fn new(id: SlotId, rect: IRect) -> Self {
        Self {
            id,
            rect,
            selected: false,
            item: None,
            drawn: false,
            attached: Vec::new(),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn rect(&self) -> IRect {
        self.rect
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn item(&self) -> Option<&BoundItemSnapshot> {
        self.item.as_ref()
    }

    pub fn attached(&self) -> &[Attached] {
        &self.attached
    }

    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.drawn = false;
        }
    }

    /// 点击判定，边界也算命中
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.rect.min.x as f32
            && point.x <= self.rect.max.x as f32
            && point.y >= self.rect.min.y as f32
            && point.y <= self.rect.max.y as f32
    }

    /// 画出槽位；外观没变时什么都不做
    ///
    /// 不在地图画面时只清掉旧图元。
    pub fn show(&mut self, scene: &mut dyn SceneGraph, on_map: bool, style: &SlotStyle) {
        if self.drawn && on_map {
            return;
        }
        detach_all(scene, &mut self.attached);
        self.drawn = false;
        if !on_map {
            return;
        }

        for primitive in self.primitives(style) {
            let kind = primitive.kind();
            let entity = scene.attach(primitive);
            self.attached.push(Attached { kind, entity });
        }
        self.drawn = true;
    }

    /// 换上新的物品快照（或清空）并重画
    pub fn update(
        &mut self,
        item: Option<BoundItemSnapshot>,
        scene: &mut dyn SceneGraph,
        on_map: bool,
        style: &SlotStyle,
    ) {
        self.item = item;
        self.drawn = false;
        self.show(scene, on_map, style);
    }

    /// 摘掉图元；物品和选中状态保留，下次 show 原样恢复
    pub fn hide(&mut self, scene: &mut dyn SceneGraph) {
        detach_all(scene, &mut self.attached);
        self.drawn = false;
    }

    /// 按绘制顺序：底板、图标、数量、编号、选中框
    fn primitives(&self, style: &SlotStyle) -> Vec<Primitive> {
        let r = self.rect;
        let mut out = vec![Primitive::Panel {
            rect: r,
            color: style.background,
            radius: style.radius,
        }];

        if let Some(item) = &self.item {
            let icon = style.icons.size();
            let min = r.min + (r.size() - icon).div_euclid(IVec2::splat(2));
            out.push(Primitive::Icon {
                rect: IRect::from_corners(min, min + icon),
                region: style.icons.region(item.icon_index),
            });
            out.push(Primitive::Quantity {
                rect: r,
                text: item.display_quantity.to_string(),
                font_size: style.font_size,
                inset: QUANTITY_INSET,
            });
        }

        // 编号居中压在槽位上沿
        let half = style.font_size.ceil() as i32;
        out.push(Primitive::Label {
            rect: IRect::new(r.min.x, r.min.y - half, r.max.x, r.min.y + half),
            text: self.id.to_string(),
            font_size: style.font_size,
        });

        if self.selected {
            let m = style.line_margin;
            out.push(Primitive::Outline {
                rect: IRect::new(r.min.x - m, r.min.y - m, r.max.x + m, r.max.y + m),
                weight: style.line_weight,
                color: style.line_color,
                radius: style.radius,
            });
        }
        out
    }
}

//! 插件与宿主场景图之间的接缝
//!
//! 槽位只描述要画什么（[`Primitive`]），真正生成节点由 [`SceneGraph`] 完成。

use bevy::prelude::*;

use super::icon::OverlayAssets;

/// 叠加层在其它 UI 之上
const OVERLAY_Z: i32 = 10;
/// 白字外的黑色描边
const LABEL_OUTLINE: TextShadow = TextShadow {
    offset: Vec2::new(1.0, 1.0),
    color: Color::srgba(0.0, 0.0, 0.0, 0.8),
};

/// 图元种类，同时作为组件挂在生成的实体上
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Panel,
    Outline,
    Label,
    Icon,
    Quantity,
}

/// 一个待绘制的图元，坐标为屏幕像素（左上角为原点）
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// 圆角填充矩形
    Panel { rect: IRect, color: Color, radius: f32 },
    /// 圆角描边矩形
    Outline { rect: IRect, weight: f32, color: Color, radius: f32 },
    /// 在 rect 内居中的文字
    Label { rect: IRect, text: String, font_size: f32 },
    /// 图集中 `region` 区域，画在 rect
    Icon { rect: IRect, region: Rect },
    /// 贴着 rect 右下角、内缩 `inset` 的文字
    Quantity { rect: IRect, text: String, font_size: f32, inset: f32 },
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Panel { .. } => PrimitiveKind::Panel,
            Primitive::Outline { .. } => PrimitiveKind::Outline,
            Primitive::Label { .. } => PrimitiveKind::Label,
            Primitive::Icon { .. } => PrimitiveKind::Icon,
            Primitive::Quantity { .. } => PrimitiveKind::Quantity,
        }
    }
}

/// 已挂到场景图上的图元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attached {
    pub kind: PrimitiveKind,
    pub entity: Entity,
}

/// 宿主场景图
pub trait SceneGraph {
    fn attach(&mut self, primitive: Primitive) -> Entity;
    fn detach(&mut self, entity: Entity);
}

/// 把一组图元全部摘掉
pub fn detach_all(scene: &mut dyn SceneGraph, attached: &mut Vec<Attached>) {
    for a in attached.drain(..) {
        scene.detach(a.entity);
    }
}

/// 用 Bevy UI 节点实现的场景图
pub struct BevyScene<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    atlas: Handle<Image>,
    font: Handle<Font>,
}

impl<'a, 'w, 's> BevyScene<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, assets: &OverlayAssets) -> Self {
        Self {
            commands,
            atlas: assets.image.clone(),
            font: assets.label_font.clone(),
        }
    }
}

fn absolute(rect: IRect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x as f32),
        top: Val::Px(rect.min.y as f32),
        width: Val::Px(rect.width() as f32),
        height: Val::Px(rect.height() as f32),
        ..default()
    }
}

fn text_bundle(text: String, font_size: f32, font: Handle<Font>) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font,
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        LABEL_OUTLINE,
    )
}

impl SceneGraph for BevyScene<'_, '_, '_> {
    fn attach(&mut self, primitive: Primitive) -> Entity {
        let kind = primitive.kind();
        let font = self.font.clone();
        match primitive {
            Primitive::Panel { rect, color, radius } => self
                .commands
                .spawn((
                    kind,
                    absolute(rect),
                    BackgroundColor(color),
                    BorderRadius::all(Val::Px(radius)),
                    GlobalZIndex(OVERLAY_Z),
                ))
                .id(),
            Primitive::Outline { rect, weight, color, radius } => self
                .commands
                .spawn((
                    kind,
                    Node {
                        border: UiRect::all(Val::Px(weight)),
                        ..absolute(rect)
                    },
                    BorderColor(color),
                    BorderRadius::all(Val::Px(radius)),
                    GlobalZIndex(OVERLAY_Z),
                ))
                .id(),
            Primitive::Label { rect, text, font_size } => self
                .commands
                .spawn((
                    kind,
                    Node {
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..absolute(rect)
                    },
                    GlobalZIndex(OVERLAY_Z),
                ))
                .with_children(|parent| {
                    parent.spawn(text_bundle(text, font_size, font));
                })
                .id(),
            Primitive::Icon { rect, region } => self
                .commands
                .spawn((
                    kind,
                    absolute(rect),
                    ImageNode {
                        image: self.atlas.clone(),
                        rect: Some(region),
                        ..default()
                    },
                    GlobalZIndex(OVERLAY_Z),
                ))
                .id(),
            Primitive::Quantity { rect, text, font_size, inset } => self
                .commands
                .spawn((
                    kind,
                    Node {
                        justify_content: JustifyContent::FlexEnd,
                        align_items: AlignItems::FlexEnd,
                        padding: UiRect::all(Val::Px(inset)),
                        ..absolute(rect)
                    },
                    GlobalZIndex(OVERLAY_Z),
                ))
                .with_children(|parent| {
                    parent.spawn(text_bundle(text, font_size, font));
                })
                .id(),
        }
    }

    fn detach(&mut self, entity: Entity) {
        self.commands.entity(entity).despawn();
    }
}

/// 测试用场景图：记录当前挂着的图元
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingScene {
    world: World,
    pub live: Vec<(Entity, Primitive)>,
    pub attached_total: usize,
    pub detached_total: usize,
}

#[cfg(test)]
impl RecordingScene {
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.live.iter().filter(|(_, p)| p.kind() == kind).count()
    }

    pub fn texts(&self, kind: PrimitiveKind) -> Vec<String> {
        self.live
            .iter()
            .filter_map(|(_, p)| match p {
                Primitive::Label { text, .. } | Primitive::Quantity { text, .. }
                    if p.kind() == kind =>
                {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl SceneGraph for RecordingScene {
    fn attach(&mut self, primitive: Primitive) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.live.push((entity, primitive));
        self.attached_total += 1;
        entity
    }

    fn detach(&mut self, entity: Entity) {
        self.live.retain(|(e, _)| *e != entity);
        self.detached_total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detach_all_empties_the_set() {
        let mut scene = RecordingScene::default();
        let mut attached = Vec::new();
        for kind in [PrimitiveKind::Panel, PrimitiveKind::Label] {
            let p = match kind {
                PrimitiveKind::Panel => Primitive::Panel {
                    rect: IRect::new(0, 0, 10, 10),
                    color: Color::BLACK,
                    radius: 2.0,
                },
                _ => Primitive::Label {
                    rect: IRect::new(0, 0, 10, 10),
                    text: "1".into(),
                    font_size: 10.0,
                },
            };
            let entity = scene.attach(p);
            attached.push(Attached { kind, entity });
        }
        assert_eq!(scene.live.len(), 2);

        detach_all(&mut scene, &mut attached);
        assert!(attached.is_empty());
        assert!(scene.live.is_empty());
        assert_eq!(scene.detached_total, 2);
    }

    #[test]
    fn bevy_scene_spawns_and_despawns_nodes() {
        let mut world = World::new();
        let mut queue = bevy::ecs::world::CommandQueue::default();
        let entity = {
            let mut commands = Commands::new(&mut queue, &world);
            let mut scene = BevyScene::new(&mut commands, &OverlayAssets::default());
            scene.attach(Primitive::Label {
                rect: IRect::new(10, 10, 58, 30),
                text: "3".into(),
                font_size: 10.0,
            })
        };
        queue.apply(&mut world);

        assert_eq!(world.get::<PrimitiveKind>(entity), Some(&PrimitiveKind::Label));
        let node = world.get::<Node>(entity).unwrap();
        assert_eq!(node.left, Val::Px(10.0));
        assert_eq!(node.width, Val::Px(48.0));
        let text = world.get::<Children>(entity).unwrap()[0];
        assert_eq!(world.get::<Text>(text).map(|t| t.0.as_str()), Some("3"));
        assert_eq!(world.get::<TextColor>(text).map(|c| c.0), Some(Color::WHITE));
        assert!(world.get::<TextShadow>(text).is_some());

        {
            let mut commands = Commands::new(&mut queue, &world);
            let mut scene = BevyScene::new(&mut commands, &OverlayAssets::default());
            scene.detach(entity);
        }
        queue.apply(&mut world);
        assert!(world.get_entity(entity).is_err());
    }
}

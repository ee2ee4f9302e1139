use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::events::SimulatedInput;
use super::resources::FrameInput;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// 每帧开头：把键盘 / 鼠标 / 模拟输入合并成一份 FrameInput
pub fn gather_frame_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut simulated: EventReader<SimulatedInput>,
    mut input: ResMut<FrameInput>,
) {
    input.clear();

    if let Some(keys) = keys {
        for (i, key) in DIGIT_KEYS.iter().enumerate() {
            if keys.just_pressed(*key) {
                input.digits.push(i as u8 + 1);
            }
        }
    }

    if let Some(mouse) = mouse {
        if mouse.just_pressed(MouseButton::Left) {
            input.click = windows.single().ok().and_then(Window::cursor_position);
        }
        if mouse.just_released(MouseButton::Left) {
            input.released = true;
        }
    }

    for ev in simulated.read() {
        match *ev {
            SimulatedInput::Digit(d) if (1..=9).contains(&d) => input.digits.push(d),
            SimulatedInput::Digit(_) => {}
            SimulatedInput::Click(pos) => input.click = Some(pos),
            SimulatedInput::Release => input.released = true,
        }
    }
}

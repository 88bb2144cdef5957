//! Static scenery: room outlines, furniture and health bars.

use crate::geometry::{Point, Rect};
use crate::world::{Chest, Door, Prop, RoomShape};

use super::frame::{Color, Frame};

pub const SCREEN: Rect = Rect::new(0, 0, 640, 480);

pub const HEALTH_BAR_WIDTH: i32 = 40;
pub const HEALTH_BAR_HEIGHT: i32 = 5;

const WALL: Color = Color::SILVER;
const FLOOR: Color = Color::DARK_BLUE;

pub fn draw_room_shape(frame: &mut Frame, shape: RoomShape) {
    match shape {
        RoomShape::Square => boxed(frame, Rect::new(20, 20, 600, 440)),
        RoomShape::Wide => boxed(frame, Rect::new(20, 120, 600, 240)),
        RoomShape::Tall => boxed(frame, Rect::new(170, 20, 300, 440)),
        RoomShape::Circle => ellipse(frame, Point::new(320, 240), 300, 220),
        RoomShape::Control => {
            let hex = [
                Point::new(170, 20),
                Point::new(470, 20),
                Point::new(620, 240),
                Point::new(470, 460),
                Point::new(170, 460),
                Point::new(20, 240),
            ];
            frame.fill(Rect::new(170, 20, 300, 440), FLOOR);
            frame.polygon(&hex, WALL);
        }
    }
}

fn boxed(frame: &mut Frame, rect: Rect) {
    frame.fill(rect, FLOOR);
    frame.outline(rect, WALL);
}

/// Horizontal strips whose half-width follows the ellipse equation.
fn ellipse(frame: &mut Frame, center: Point, rx: i32, ry: i32) {
    const STRIP: i32 = 10;
    let mut y = -ry;
    while y < ry {
        let mid = f64::from(y + STRIP / 2) / f64::from(ry);
        let half = (f64::from(rx) * (1.0 - mid * mid).max(0.0).sqrt()).round() as i32;
        let strip = Rect::new(center.x - half, center.y + y, half * 2, STRIP);
        frame.fill(strip, FLOOR);
        frame.fill(Rect::new(strip.x, strip.y, 2, STRIP), WALL);
        frame.fill(Rect::new(strip.right() - 2, strip.y, 2, STRIP), WALL);
        y += STRIP;
    }
}

pub fn draw_door(frame: &mut Frame, door: &Door, label: &str) {
    if door.is_locked() {
        frame.fill(door.rect, Color::SIENNA);
        frame.fill(
            Rect::new(door.rect.center().x - 2, door.rect.center().y - 2, 4, 4),
            Color::YELLOW,
        );
    } else {
        frame.fill(door.rect, Color::BLACK);
    }
    frame.outline(door.rect, Color::SIENNA);
    frame.text(Point::new(door.rect.x, door.rect.y - 12), label, Color::WHITE);
}

pub fn draw_chest(frame: &mut Frame, chest: &Chest) {
    let r = chest.rect;
    frame.fill(r, Color::SIENNA);
    frame.outline(r, Color::KHAKI);
    if chest.opened {
        frame.line(Point::new(r.x, r.y), Point::new(r.right(), r.bottom()), Color::BLACK);
        frame.line(Point::new(r.right(), r.y), Point::new(r.x, r.bottom()), Color::BLACK);
    } else {
        frame.text(Point::new(r.x, r.y - 12), "chest", Color::KHAKI);
    }
}

pub fn draw_prop(frame: &mut Frame, prop: &Prop) {
    frame.fill(prop.rect, Color::GRAY);
    frame.outline(prop.rect, WALL);
}

pub fn health_color(hp: i32, max_hp: i32) -> Color {
    let ratio = f64::from(hp.max(0)) / f64::from(max_hp.max(1));
    if ratio >= 0.5 {
        Color::GREEN
    } else if ratio >= 0.25 {
        Color::YELLOW
    } else {
        Color::RED
    }
}

/// 40x5 bar centred over a character standing at `feet`.
pub fn draw_health_bar(frame: &mut Frame, feet: Point, hp: i32, max_hp: i32) {
    let back = Rect::new(
        feet.x - HEALTH_BAR_WIDTH / 2,
        feet.y - 60,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
    );
    let filled = HEALTH_BAR_WIDTH * hp.clamp(0, max_hp) / max_hp.max(1);
    frame.fill(back, Color::GRAY);
    frame.fill(
        Rect::new(back.x, back.y, filled, HEALTH_BAR_HEIGHT),
        health_color(hp, max_hp),
    );
}

//! Retained-mode scene graph
//!
//! Every visible entity is registered here as a drawable object. Collision
//! detection asks the scene which object sits at a point, the renderer
//! walks the objects in paint order.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::BrickId;

/// Handle to an object registered in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

/// What a scene object stands for in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectTag {
    Ball,
    Paddle,
    Label,
    Brick(BrickId),
}

/// RGBA color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const PINK: Color = Color::rgb(255, 175, 175);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Look up a color by its toolkit name (`"RED"`, `"dark_gray"`, ...)
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_uppercase().replace(' ', "_").as_str() {
            "BLACK" => Color::BLACK,
            "BLUE" => Color::BLUE,
            "CYAN" => Color::CYAN,
            "DARK_GRAY" => Color::DARK_GRAY,
            "GRAY" => Color::GRAY,
            "GREEN" => Color::GREEN,
            "LIGHT_GRAY" => Color::LIGHT_GRAY,
            "MAGENTA" => Color::MAGENTA,
            "ORANGE" => Color::ORANGE,
            "PINK" => Color::PINK,
            "RED" => Color::RED,
            "WHITE" => Color::WHITE,
            "YELLOW" => Color::YELLOW,
            _ => return None,
        };
        Some(color)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Serialized form of a color: a toolkit name or an RGBA array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Name(String),
    Rgba([f32; 4]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Name(name) => {
                Color::named(&name).ok_or_else(|| format!("unknown color name {name:?}"))
            }
            ColorRepr::Rgba([r, g, b, a]) => Ok(Color { r, g, b, a }),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(color: Color) -> Self {
        ColorRepr::Rgba(color.to_array())
    }
}

/// Label font, written `Family-Size` or `Family-Style-Size` (e.g. `SansSerif-36`)
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub style: Option<String>,
    pub size: f32,
}

impl Font {
    /// Horizontal advance per character, as a fraction of the font size
    const ADVANCE: f32 = 0.6;

    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            style: None,
            size,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.rsplitn(3, '-');
        let size: f32 = parts.next()?.trim().parse().ok()?;
        if !size.is_finite() || size <= 0.0 {
            return None;
        }
        let (family, style) = match (parts.next(), parts.next()) {
            (Some(style), Some(family)) => (family, Some(style.to_string())),
            (Some(family), None) => (family, None),
            _ => return None,
        };
        if family.is_empty() {
            return None;
        }
        Some(Self {
            family: family.to_string(),
            style,
            size,
        })
    }

    /// Bounding box of `text` set in this font
    pub fn measure(&self, text: &str) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        Vec2::new(glyphs * self.size * Self::ADVANCE, self.size)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.style {
            Some(style) => write!(f, "{}-{}-{}", self.family, style, self.size),
            None => write!(f, "{}-{}", self.family, self.size),
        }
    }
}

/// Geometry of a scene object
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect,
    /// Ellipse inscribed in the object's bounding box
    Oval,
    Label { text: String, font: Font },
}

/// A drawable registered with the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub tag: ObjectTag,
    pub shape: Shape,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub filled: bool,
}

impl SceneObject {
    /// Whether `point` lies on this object's shape (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        match self.shape {
            Shape::Rect | Shape::Label { .. } => {
                let max = self.pos + self.size;
                point.x >= self.pos.x && point.x <= max.x && point.y >= self.pos.y && point.y <= max.y
            }
            Shape::Oval => {
                let half = self.size * 0.5;
                if half.x <= 0.0 || half.y <= 0.0 {
                    return false;
                }
                let d = (point - (self.pos + half)) / half;
                d.length_squared() <= 1.0
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Label { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Fixed-size scene; objects are kept in paint order (last is topmost)
#[derive(Debug, Clone)]
pub struct Scene {
    size: Vec2,
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    fn add(&mut self, tag: ObjectTag, shape: Shape, pos: Vec2, size: Vec2, color: Color) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            tag,
            shape,
            pos,
            size,
            color,
            filled: true,
        });
        id
    }

    /// Register a filled rectangle
    pub fn add_rect(&mut self, tag: ObjectTag, pos: Vec2, size: Vec2, color: Color) -> ObjectId {
        self.add(tag, Shape::Rect, pos, size, color)
    }

    /// Register a filled ellipse inscribed in `pos..pos + size`
    pub fn add_oval(&mut self, tag: ObjectTag, pos: Vec2, size: Vec2, color: Color) -> ObjectId {
        self.add(tag, Shape::Oval, pos, size, color)
    }

    /// Register a text label at `pos`, sized by its font metrics
    pub fn add_label(&mut self, tag: ObjectTag, text: &str, font: Font, pos: Vec2, color: Color) -> ObjectId {
        let size = font.measure(text);
        let shape = Shape::Label {
            text: text.to_string(),
            font,
        };
        self.add(tag, shape, pos, size, color)
    }

    /// Unregister an object, returning it if it was present
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: ObjectId) -> Option<Vec2> {
        self.get(id).map(|o| o.pos)
    }

    pub fn object_size(&self, id: ObjectId) -> Option<Vec2> {
        self.get(id).map(|o| o.size)
    }

    pub fn set_location(&mut self, id: ObjectId, pos: Vec2) {
        if let Some(object) = self.get_mut(id) {
            object.pos = pos;
        }
    }

    pub fn translate(&mut self, id: ObjectId, delta: Vec2) {
        if let Some(object) = self.get_mut(id) {
            object.pos += delta;
        }
    }

    pub fn set_color(&mut self, id: ObjectId, color: Color) {
        if let Some(object) = self.get_mut(id) {
            object.color = color;
        }
    }

    /// Switch between a solid shape and its outline. Hit-testing ignores this.
    pub fn set_filled(&mut self, id: ObjectId, filled: bool) {
        if let Some(object) = self.get_mut(id) {
            object.filled = filled;
        }
    }

    /// Replace a label's text and resize it to fit
    pub fn set_label_text(&mut self, id: ObjectId, new_text: &str) {
        if let Some(object) = self.get_mut(id) {
            if let Shape::Label { text, font } = &mut object.shape {
                *text = new_text.to_string();
                object.size = font.measure(new_text);
            }
        }
    }

    /// Change a label's font and resize it to fit
    pub fn set_label_font(&mut self, id: ObjectId, new_font: Font) {
        if let Some(object) = self.get_mut(id) {
            if let Shape::Label { text, font } = &mut object.shape {
                object.size = new_font.measure(text);
                *font = new_font;
            }
        }
    }

    /// Topmost object whose shape contains `point`
    pub fn object_at(&self, point: Vec2) -> Option<&SceneObject> {
        self.objects.iter().rev().find(|o| o.contains(point))
    }

    /// Objects in paint order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First object carrying `tag`
    pub fn find_tagged(&self, tag: ObjectTag) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.tag == tag)
    }
}

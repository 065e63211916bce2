//! Draw primitives and the surface they are submitted to

use glam::Vec2;

/// Pre-decoded image resources, addressed by logical name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Bull,
    Obstacles,
    Egg,
    Larva,
    Toad,
}

impl SpriteSheet {
    pub const ALL: [SpriteSheet; 5] = [
        SpriteSheet::Bull,
        SpriteSheet::Obstacles,
        SpriteSheet::Egg,
        SpriteSheet::Larva,
        SpriteSheet::Toad,
    ];

    /// Name the host uses for this image
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteSheet::Bull => "bull",
            SpriteSheet::Obstacles => "obstacles",
            SpriteSheet::Egg => "egg",
            SpriteSheet::Larva => "larva",
            SpriteSheet::Toad => "toad",
        }
    }
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Cell `(col, row)` of a sheet made of `w` x `h` cells
    pub fn cell(col: u32, row: u32, w: f32, h: f32) -> Self {
        Self::new(col as f32 * w, row as f32 * h, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

/// How a circle is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleStyle {
    /// Collision overlay: half-transparent default fill plus outline
    Hitbox,
    /// Opaque fill in a CSS color plus outline
    Solid(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { width: f32, height: f32 },
    /// Blit `src` from a sheet into `dst`
    Sprite {
        sheet: SpriteSheet,
        src: Rect,
        dst: Rect,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: CircleStyle,
    },
    Line { from: Vec2, to: Vec2 },
    Text {
        text: String,
        pos: Vec2,
        align: TextAlign,
    },
}

/// Anything that accepts draw commands
pub trait Surface {
    fn submit(&mut self, command: DrawCommand);
}

/// Surface that records commands instead of painting them
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite blits in submission order
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteSheet, Rect, Rect)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sheet, src, dst } => Some((*sheet, *src, *dst)),
            _ => None,
        })
    }

    /// Text draws in submission order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

//! Canvas 2D backend (WASM only)

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::draw::{CircleStyle, DrawCommand, Surface, TextAlign};
use super::SpriteSheet;

/// Replays draw commands onto a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteSheet, HtmlImageElement>,
}

impl CanvasSurface {
    /// Acquire the 2D context and look up the sprite `<img>` elements by id
    pub fn new(canvas: &HtmlCanvasElement, document: &Document) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        ctx.set_line_width(3.0);
        ctx.set_fill_style_str("white");
        ctx.set_stroke_style_str("black");
        ctx.set_text_align("center");
        ctx.set_font("40px Helvetica");

        let mut images = HashMap::new();
        for sheet in SpriteSheet::ALL {
            match document
                .get_element_by_id(sheet.as_str())
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                Some(img) => {
                    images.insert(sheet, img);
                }
                None => log::warn!("Missing image #{}", sheet.as_str()),
            }
        }

        Ok(Self { ctx, images })
    }

    fn paint(&self, command: DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            }
            DrawCommand::Sprite { sheet, src, dst } => {
                if let Some(img) = self.images.get(&sheet) {
                    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        img,
                        src.x as f64,
                        src.y as f64,
                        src.w as f64,
                        src.h as f64,
                        dst.x as f64,
                        dst.y as f64,
                        dst.w as f64,
                        dst.h as f64,
                    )?;
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
                ctx.save();
                match style {
                    CircleStyle::Hitbox => ctx.set_global_alpha(0.5),
                    CircleStyle::Solid(color) => ctx.set_fill_style_str(color),
                }
                ctx.fill();
                ctx.restore();
                ctx.stroke();
            }
            DrawCommand::Line { from, to } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Text { text, pos, align } => {
                ctx.save();
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                let result = ctx.fill_text(&text, pos.x as f64, pos.y as f64);
                ctx.restore();
                result?;
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn submit(&mut self, command: DrawCommand) {
        if let Err(e) = self.paint(command) {
            log::warn!("Draw error: {:?}", e);
        }
    }
}

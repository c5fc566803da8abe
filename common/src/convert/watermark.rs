//! 透かし文字の描画
//!
//! 8x8 のビットマップフォント（font8x8）を文字サイズに合わせて拡大し、
//! 画像の右下（余白10px）に半透明の白で重ねる。

use crate::AUTHOR_SIGNATURE;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

pub const WATERMARK_TEXT: &str = AUTHOR_SIGNATURE;
pub const WATERMARK_MARGIN: u32 = 10;
/// rgba(255, 255, 255, 0.6)
pub const WATERMARK_COLOR: Rgba<u8> = Rgba([255, 255, 255, 153]);
pub const MIN_FONT_SIZE: f32 = 12.0;

const GLYPH_SIZE: f32 = 8.0;

/// 文字サイズ: max(12, min(幅/25, 高さ/25))
pub fn font_size(width: u32, height: u32) -> f32 {
    (width as f32 / 25.0)
        .min(height as f32 / 25.0)
        .max(MIN_FONT_SIZE)
}

/// 透かしの外接矩形 (x0, y0, x1, y1)。左・上は画像外にはみ出すことがある。
pub fn watermark_bounds(width: u32, height: u32) -> (f32, f32, f32, f32) {
    let size = font_size(width, height);
    let right = width as f32 - WATERMARK_MARGIN as f32;
    let bottom = height as f32 - WATERMARK_MARGIN as f32;
    let text_width = WATERMARK_TEXT.chars().count() as f32 * size;
    (right - text_width, bottom - size, right, bottom)
}

/// 画像に透かしを描く
pub fn apply_watermark(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let size = font_size(width, height);
    let (x0, y0, _, _) = watermark_bounds(width, height);

    tracing::debug!(width, height, font_size = size, "drawing watermark");
    draw_text(canvas, WATERMARK_TEXT, x0, y0, size, WATERMARK_COLOR);
}

/// 左上 (x, y)、1文字 size×size のセルで文字列を描く
pub fn draw_text(canvas: &mut RgbaImage, text: &str, x: f32, y: f32, size: f32, color: Rgba<u8>) {
    if size <= 0.0 {
        return;
    }
    let (width, height) = canvas.dimensions();

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let cell_x = x + index as f32 * size;

        let px_start = cell_x.floor().max(0.0) as u32;
        let px_end = ((cell_x + size).ceil().max(0.0) as u32).min(width);
        let py_start = y.floor().max(0.0) as u32;
        let py_end = ((y + size).ceil().max(0.0) as u32).min(height);

        for py in py_start..py_end {
            // ピクセル中心でグリフをサンプリング
            let gy = ((py as f32 + 0.5 - y) / size * GLYPH_SIZE).floor();
            if !(0.0..GLYPH_SIZE).contains(&gy) {
                continue;
            }
            let row = glyph[gy as usize];

            for px in px_start..px_end {
                let gx = ((px as f32 + 0.5 - cell_x) / size * GLYPH_SIZE).floor();
                if !(0.0..GLYPH_SIZE).contains(&gx) {
                    continue;
                }
                if (row >> gx as u32) & 1 == 0 {
                    continue;
                }
                let dst = *canvas.get_pixel(px, py);
                canvas.put_pixel(px, py, blend_pixel(dst, color));
            }
        }
    }
}

/// source-over 合成
pub fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = f32::from(src[3]) / 255.0;
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |s: u8, d: u8| -> u8 {
        let c = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

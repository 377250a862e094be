//! Canvas2D painter for a board `Frame`.
//!
//! All geometry arrives in surface coordinates; this module only issues
//! draw calls, in frame order.

use tb_render::frame::{Frame, MarkerFeed};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, Path2d};

const STAGE_BG: &str = "#FFFFFF";
const LABEL_COLOR: &str = "#FFFFFF";
const LABEL_FONT: &str = "14px sans-serif";
const MARKER_SHADOW_BLUR: f64 = 5.0;

/// Paint `frame` onto a `width` x `height` canvas.
///
/// `court` is the image for the frame's court variant; the background is
/// skipped until both it and a fitted rect are available.
pub fn render_frame(
    ctx: &CanvasRenderingContext2d,
    frame: &Frame,
    width: f64,
    height: f64,
    court: Option<&HtmlImageElement>,
) {
    ctx.set_fill_style_str(STAGE_BG);
    ctx.fill_rect(0.0, 0.0, width, height);

    if let (Some(rect), Some(image)) = (frame.background, court) {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
        );
    }

    for stroke in &frame.strokes {
        stroke_path(ctx, &stroke.path, &stroke.color.to_hex(), stroke.width);
    }
    for trail in &frame.trails {
        stroke_path(ctx, &trail.path, &trail.color.to_hex(), trail.width);
    }
    for marker in &frame.markers {
        draw_marker(ctx, marker);
    }
}

fn stroke_path(ctx: &CanvasRenderingContext2d, data: &str, color: &str, width: f64) {
    let Ok(path) = Path2d::new_with_path_string(data) else {
        log::warn!("skip unparsable path {data:?}");
        return;
    };
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.stroke_with_path(&path);
    ctx.restore();
}

fn draw_marker(ctx: &CanvasRenderingContext2d, marker: &MarkerFeed) {
    ctx.save();
    ctx.set_shadow_blur(MARKER_SHADOW_BLUR);
    ctx.set_shadow_color("rgba(0, 0, 0, 0.5)");
    ctx.set_fill_style_str(&marker.color.to_hex());
    ctx.begin_path();
    let _ = ctx.arc(
        marker.center.x,
        marker.center.y,
        marker.radius,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.fill();
    ctx.restore();

    ctx.save();
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font(LABEL_FONT);
    ctx.set_text_baseline("top");
    let _ = ctx.fill_text(&marker.name, marker.label.x, marker.label.y);
    ctx.restore();
}

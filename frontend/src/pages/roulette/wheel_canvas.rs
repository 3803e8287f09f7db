use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use shared::wheel::segment_angle;

/// Segment palette, cycled in list order.
const WHEEL_COLORS: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#a8e6cf", "#dcedc1",
];

const CANVAS_SIZE: f64 = 420.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub rotation: f64,
    pub items: Vec<String>,
    pub is_spinning: bool,
}

/// Draws the wheel: equal segments in list order, clockwise from the
/// top-anchored pointer, rotated as a whole by `rotation` degrees. The
/// labels are part of the rotated drawing, so a redraw only ever moves
/// them, it never reshuffles them.
#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let rotation = props.rotation;
        let items = props.items.clone();
        let is_spinning = props.is_spinning;

        use_effect_with(
            (rotation, items, is_spinning),
            move |(rotation, items, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Some(context) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
                    {
                        draw_wheel(&context, *rotation, items, *is_spinning);
                    }
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width={CANVAS_SIZE.to_string()}
                height={CANVAS_SIZE.to_string()}
                class="w-full max-w-[420px] h-auto rounded-full"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(250, 200, 80, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.3));"
                }}
            />
        </div>
    }
}

fn draw_wheel(
    context: &CanvasRenderingContext2d,
    rotation: f64,
    items: &[String],
    is_spinning: bool,
) {
    let center = CANVAS_SIZE / 2.0;
    let radius = center - 24.0;

    context.clear_rect(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);

    // Wheel background
    context.begin_path();
    context.set_fill_style_str("#1a1c2e");
    let _ = context.arc(center, center, radius, 0.0, 2.0 * PI);
    context.fill();

    if items.is_empty() {
        context.set_fill_style_str("#9ca3af");
        context.set_font("bold 18px 'Segoe UI', Roboto, system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        let _ = context.fill_text("Add items to spin", center, center);
        draw_pointer(context, center, radius, is_spinning);
        return;
    }

    let seg = segment_angle(items.len());

    // Segments and labels rotate together with the wheel.
    context.save();
    let _ = context.translate(center, center);
    let _ = context.rotate(rotation * PI / 180.0);
    let _ = context.translate(-center, -center);

    for (i, item) in items.iter().enumerate() {
        // List angle 0 sits at the top of the screen; canvas angle 0
        // points right, hence the quarter-turn shift.
        let from = (i as f64 * seg - 90.0) * PI / 180.0;
        let to = ((i as f64 + 1.0) * seg - 90.0) * PI / 180.0;

        context.begin_path();
        context.set_fill_style_str(WHEEL_COLORS[i % WHEEL_COLORS.len()]);
        context.move_to(center, center);
        let _ = context.arc(center, center, radius, from, to);
        context.fill();

        context.begin_path();
        context.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        context.set_line_width(2.0);
        context.move_to(center, center);
        context.line_to(center + radius * from.cos(), center + radius * from.sin());
        context.stroke();

        // Label along the segment's bisector
        context.save();
        let _ = context.translate(center, center);
        let _ = context.rotate(((i as f64 + 0.5) * seg - 90.0) * PI / 180.0);
        let _ = context.translate(radius * 0.62, 0.0);
        context.set_fill_style_str("#1f2937");
        context.set_font("bold 16px 'Segoe UI', Roboto, system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        let label = if item.chars().count() > 14 {
            let truncated: String = item.chars().take(13).collect();
            format!("{}…", truncated)
        } else {
            item.clone()
        };
        let _ = context.fill_text(&label, 0.0, 0.0);
        context.restore();
    }

    context.restore();

    // Hub
    context.begin_path();
    context.set_fill_style_str("#2d3142");
    let _ = context.arc(center, center, radius * 0.16, 0.0, 2.0 * PI);
    context.fill();
    context.begin_path();
    context.set_stroke_style_str("rgba(255, 255, 255, 0.4)");
    context.set_line_width(2.0);
    let _ = context.arc(center, center, radius * 0.16, 0.0, 2.0 * PI);
    context.stroke();

    // Outer ring
    context.begin_path();
    if is_spinning {
        context.set_stroke_style_str("rgba(250, 200, 80, 0.8)");
        context.set_line_width(5.0);
    } else {
        context.set_stroke_style_str("rgba(130, 100, 255, 0.5)");
        context.set_line_width(4.0);
    }
    let _ = context.arc(center, center, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    draw_pointer(context, center, radius, is_spinning);
}

/// The fixed pointer never rotates; it marks screen angle zero at the
/// top of the wheel.
fn draw_pointer(context: &CanvasRenderingContext2d, center: f64, radius: f64, is_spinning: bool) {
    context.begin_path();
    context.move_to(center, center - radius + 8.0);
    context.line_to(center - 14.0, center - radius - 18.0);
    context.line_to(center + 14.0, center - radius - 18.0);
    context.close_path();

    if is_spinning {
        context.set_fill_style_str("#ffd700");
    } else {
        context.set_fill_style_str("#f59e0b");
    }
    context.fill();

    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
}

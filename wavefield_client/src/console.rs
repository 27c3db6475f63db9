//! Console commands.
//!
//! Lines typed on stdin stand in for the host's input callbacks:
//!
//! ```text
//! move <x> <y>                 - pointer move in client pixels
//! touch <x> <y> [<x> <y> ...]  - touch move, first contact wins
//! resize <w> <h> [<dpr>]       - viewport resize
//! status                       - print loop state
//! quit | exit                  - stop the loop
//! ```

use anyhow::{bail, Context};
use wavefield_shared::{
    animation::AnimationLoop,
    cursor::TouchPoint,
    input::InputEvent,
    render::RenderBackend,
    time::Clock,
    viewport::Viewport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Input(InputEvent),
    Status,
    Quit,
}

fn number<T: std::str::FromStr>(token: &str, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse()
        .with_context(|| format!("invalid {what}: {token}"))
}

/// Parses one console line.
pub fn parse(line: &str) -> anyhow::Result<ConsoleCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = tokens.split_first() else {
        bail!("empty command");
    };

    match cmd {
        "move" => {
            let [x, y] = args else {
                bail!("Usage: move <x> <y>");
            };
            Ok(ConsoleCommand::Input(InputEvent::pointer(
                number(x, "x")?,
                number(y, "y")?,
            )))
        }
        "touch" => {
            if args.is_empty() || args.len() % 2 != 0 {
                bail!("Usage: touch <x> <y> [<x> <y> ...]");
            }
            let touches = args
                .chunks_exact(2)
                .map(|pair| -> anyhow::Result<TouchPoint> {
                    Ok(TouchPoint {
                        client_x: number(pair[0], "x")?,
                        client_y: number(pair[1], "y")?,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(ConsoleCommand::Input(InputEvent::TouchMove(touches)))
        }
        "resize" => {
            let (w, h, dpr) = match args {
                [w, h] => (w, h, None),
                [w, h, dpr] => (w, h, Some(dpr)),
                _ => bail!("Usage: resize <w> <h> [<dpr>]"),
            };
            let device_pixel_ratio: f32 = match dpr {
                Some(dpr) => number(dpr, "device pixel ratio")?,
                None => 1.0,
            };
            if device_pixel_ratio <= 0.0 {
                bail!("device pixel ratio must be positive");
            }
            Ok(ConsoleCommand::Input(InputEvent::Resize(Viewport::new(
                number(w, "width")?,
                number(h, "height")?,
                device_pixel_ratio,
            ))))
        }
        "status" => Ok(ConsoleCommand::Status),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => bail!("Unknown command: {other}"),
    }
}

/// Human-readable loop state for the `status` command.
pub fn status_lines<R: RenderBackend, C: Clock>(anim: &AnimationLoop<R, C>) -> Vec<String> {
    let camera = anim.camera();
    let cursor = anim.cursor();
    let viewport = anim.viewport();
    vec![
        format!("Frame: {}", anim.frame_count()),
        format!("Points: {}", anim.field().len()),
        format!("Cursor: ({:.3}, {:.3})", cursor.x, cursor.y),
        format!(
            "Camera: ({:.3}, {:.3}, {:.3}) aspect {:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.aspect()
        ),
        format!("Mesh rotation: {:.3} rad", anim.mesh().rotation_y),
        format!(
            "Viewport: {}x{} @ {}",
            viewport.width, viewport.height, viewport.device_pixel_ratio
        ),
        format!(
            "Alpha map: {}",
            if anim.material().alpha_map.is_some() {
                "attached"
            } else {
                "none"
            }
        ),
    ]
}

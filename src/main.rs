// What you SEE:
// • A short splash, then a white canvas under a status bar.
// • Hold Left Mouse to paint; E toggles the eraser (erased areas export transparent).
// • 1-9/0 or P pick colors, [ ] change brush size (Shift = 5 at a time).
// • C clears, S saves canvasflow-YYYY-MM-DD.png, H shows help, T flips the theme.
// • ESC closes help, or quits.

use canvasflow::app::{shortcut_for, App, FrameInput};
use canvasflow::config::AppConfig;
use canvasflow::draw::Drawer;
use canvasflow::error::Error;
use canvasflow::logging;
use canvasflow::types::FrameBuffer;
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> Result<(), Error> {
    /* --- Settings + logging ---
       A bad config file is reported and replaced by defaults. */
    let config_path = AppConfig::default_path();
    let (config, config_err) = match AppConfig::load(&config_path) {
        Ok(c) => (c, None),
        Err(e) if e.is_recoverable() => (AppConfig::default(), Some(e)),
        Err(e) => return Err(e),
    };
    logging::init(config.debug);
    if let Some(e) = config_err {
        warn!("{e}; using default settings");
    }
    info!(path = %config_path.display(), "starting CanvasFlow");

    /* --- Window + reusable screen buffer --- */
    let mut drawer = Drawer::new("CanvasFlow", config.width, config.height)?;
    let mut screen = FrameBuffer::new(config.width, config.height);
    let mut app = App::new(&config, Instant::now());

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !app.should_quit() {
        let now = Instant::now();

        let shift = drawer.shift_down();
        let input = FrameInput {
            size: drawer.size(),
            mouse: drawer.mouse_pos(),
            left_down: drawer.left_mouse_down(),
            shortcuts: drawer
                .keys_pressed()
                .into_iter()
                .filter_map(|k| shortcut_for(k, shift))
                .collect(),
        };

        app.update(&input, now);

        let (w, h) = input.size;
        screen.resize(w.max(1), h.max(1));
        app.render(&mut screen, now);
        if let Err(e) = drawer.present(&screen) {
            if !e.is_recoverable() {
                error!("{e}");
                return Err(e);
            }
            warn!("{e}; skipping frame");
        }
    }

    info!("bye");
    Ok(())
}

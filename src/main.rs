// What you SEE:
// • Pick a map image; it opens fully covered in black fog.
// • Hold Left Mouse to reveal, Right Mouse to hide again.
// • Wheel zooms; Ctrl + wheel changes the brush size.
// • Arrow keys pan, R rotates 90°, H toggles the help legend. ESC quits.

use std::path::PathBuf;
use std::process::ExitCode;

use fog_of_war::{Config, Error, ImageLoadError, ImagePyramid, Result, Viewport, pyramid, window::MapWindow};
use tracing::{error, info};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::ImageLoad(ImageLoadError::NoSelection)) => {
            info!("no image selected, exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::default();
    config.validate()?;

    /* --- Startup: pick and decode the map (blocks until the dialog closes) --- */
    let path = pick_image().unwrap_or_default();
    let source = pyramid::load(&path)?;
    let (img_w, img_h) = source.dimensions();
    let pyramid = ImagePyramid::build(source, &config.zoom_levels());

    /* --- Window sized to the map, capped --- */
    let (win_w, win_h) = config.window_size(img_w, img_h);
    let mut window = MapWindow::new("DND Fog of War", win_w, win_h, config.framerate, config.brush_modifier)?;
    let mut viewport = Viewport::new(config, pyramid, (win_w, win_h))?;

    /* ------------------------------ Main loop ------------------------------ */
    // present() blocks until the next tick
    while viewport.is_running() {
        let input = window.poll();
        viewport.update(&input);
        if !viewport.is_running() {
            break;
        }
        window.present(viewport.composite())?;
    }

    info!("session ended");
    Ok(())
}

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select a map image")
        .add_filter("Image Files", &["png", "jpg", "jpeg", "bmp", "gif"])
        .pick_file()
}

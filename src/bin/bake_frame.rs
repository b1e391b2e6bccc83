//! Print the calibration frame.
//!
//! By default prints the baked markup on one line. `--grid` prints the
//! plain glyph rows instead, top row first.

use anyhow::{bail, Result};
use tracing::info;

use ascii_arcade::{demo, logging};

fn main() -> Result<()> {
    logging::init_from_env()?;

    let grid = match std::env::args().nth(1).as_deref() {
        None => false,
        Some("--grid") => true,
        Some(other) => bail!("unknown argument {other:?} (expected --grid)"),
    };

    let canvas = demo::calibration_canvas();
    info!(entities = canvas.len(), grid, "baking calibration frame");

    if grid {
        let composed = canvas.compose();
        let text = composed.text();
        for row in 0..text.height() {
            println!("{}", text.row(row).iter().collect::<String>());
        }
    } else {
        println!("{}", canvas.bake());
    }
    Ok(())
}

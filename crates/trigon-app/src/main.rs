mod scene;

use std::process;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::window::{Runtime, RuntimeConfig};

use scene::{SceneConfig, TriangleScene};

fn main() {
    init_logging(LoggingConfig::default());

    let gpu_init = GpuInit {
        // Clear color and fragment output go to the screen as written.
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let scene = TriangleScene::new(SceneConfig::default());

    if let Err(e) = Runtime::run(RuntimeConfig::default(), gpu_init, scene) {
        eprintln!("{e}");
        process::exit(-1);
    }

    log::info!("bye");
}

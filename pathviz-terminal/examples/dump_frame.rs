/// Example: print one frame of particle positions without opening the viewer
///
/// Usage: cargo run --example dump_frame -- [preset] [elapsed-seconds]

use std::env;
use std::io;
use pathviz_core::{Preset, Scene};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let preset = match args.get(1) {
        Some(name) => name
            .parse::<Preset>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
        None => Preset::OffsetHelix,
    };
    let elapsed = match args.get(2) {
        Some(value) => value
            .parse::<f64>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
        None => 0.0,
    };

    let scene = Scene::from_preset(preset)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let mut positions = Vec::new();
    scene.positions(elapsed, &mut positions);

    println!("# {} at {:.2}s, {} particles", preset, elapsed, positions.len());
    for (i, p) in positions.iter().enumerate() {
        let (row, col) = scene.grid().cell(i);
        println!("{:>3} {:>3}  {:>8.3} {:>8.3} {:>8.3}", row, col, p.x, p.y, p.z);
    }
    Ok(())
}

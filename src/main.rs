// Copyright 2020 TwoCookingMice

use prismlab::core::laser::{ColorMode, LaserView};
use prismlab::core::scene_loader::load_scene_with_settings;
use prismlab::core::sensor::Sensor;
use prismlab::core::tracer::Tracer;

use std::env;
use std::process;

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scene.xml> [--max-depth N] [--wavelength NM] [--angle DEG] [--white] [--wave]", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let mut max_depth_override: Option<u32> = None;
    let mut wavelength_override: Option<f64> = None;
    let mut angle_override: Option<f64> = None;
    let mut white = false;
    let mut wave = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--max-depth" => {
                i += 1;
                max_depth_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--wavelength" => {
                i += 1;
                wavelength_override = args.get(i).and_then(|v| v.parse::<f64>().ok());
            }
            "--angle" => {
                i += 1;
                angle_override = args.get(i).and_then(|v| v.parse::<f64>().ok());
            }
            "--white" => white = true,
            "--wave" => wave = true,
            other => log::warn!("Ignoring unknown argument {}.", other),
        }
        i += 1;
    }

    let loaded = load_scene_with_settings(input_path)
        .unwrap_or_else(|e| fail(format!("failed to load scene: {}", e)));

    let mut laser = loaded.laser.unwrap_or_default();
    if let Some(wavelength) = wavelength_override {
        laser = laser.with_wavelength(wavelength).unwrap_or_else(|e| fail(e.to_string()));
    }
    if let Some(angle) = angle_override {
        laser = laser.with_angle(angle.to_radians()).unwrap_or_else(|e| fail(e.to_string()));
    }
    if white {
        laser = laser.with_color_mode(ColorMode::White);
    }
    if wave {
        laser = laser.with_view(LaserView::Wave);
    }

    let tracer = match max_depth_override {
        Some(depth) => loaded.tracer.with_max_depth(depth),
        None => loaded.tracer,
    };
    log::info!("{}", tracer.describe());

    let rays = tracer.trace(&loaded.scene, &laser);
    let deepest = rays.iter().map(|r| r.depth).max().unwrap_or(0);
    println!("segments: {}", rays.len());
    println!("deepest bounce: {}", deepest);

    match loaded.probe {
        Some(probe) => println!("intensity: {}", probe.sample(&rays)),
        None => println!("intensity: no probe in scene"),
    }
}

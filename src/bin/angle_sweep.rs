use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use prismlab::core::reading::Reading;
use prismlab::core::scene_loader::load_scene_with_settings;
use prismlab::core::sensor::Sensor;
use prismlab::core::tracer::Tracer;
use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: {} <scene.xml> <from_deg> <to_deg> <steps>", args[0]);
        std::process::exit(1);
    }

    let scene_path = &args[1];
    let from: f64 = args[2].parse().unwrap_or(0.0);
    let to: f64 = args[3].parse().unwrap_or(0.0);
    let steps: usize = args[4].parse().unwrap_or(1).max(1);

    let loaded = match load_scene_with_settings(scene_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load {}: {}", scene_path, e);
            std::process::exit(1);
        }
    };
    let probe = match loaded.probe {
        Some(probe) => probe,
        None => {
            eprintln!("{} has no <probe>; nothing to measure.", scene_path);
            std::process::exit(1);
        }
    };
    let laser = loaded.laser.unwrap_or_default();

    let progress = ProgressBar::new(steps as u64 + 1);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} angles")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut readings: Vec<(f64, Reading)> = Vec::with_capacity(steps + 1);
    for step in 0..=steps {
        let angle = from + (to - from) * step as f64 / steps as f64;
        let reading = match laser.with_angle(angle.to_radians()) {
            Ok(laser) => probe.sample(&loaded.tracer.trace(&loaded.scene, &laser)),
            Err(e) => {
                log::warn!("Skipping angle {}: {}", angle, e);
                Reading::Miss
            }
        };
        readings.push((angle, reading));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let best = readings
        .iter()
        .filter_map(|(angle, reading)| reading.value().map(|v| (*angle, v)))
        .fold(None, |best: Option<(f64, f64)>, (angle, v)| match best {
            Some((_, top)) if top >= v => best,
            _ => Some((angle, v)),
        });

    for (angle, reading) in &readings {
        let value = if reading.is_hit() {
            style(reading.to_string()).green()
        } else {
            style(reading.to_string()).dim()
        };
        println!("{:>9.3} deg  {}", angle, value);
    }
    match best {
        Some((angle, v)) => println!("{} {:.2}% at {:.3} deg", style("peak").bold(), v * 100.0, angle),
        None => println!("{}", style("probe never lit").red()),
    }
}

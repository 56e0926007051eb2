use prismlab::core::scene_loader::load_scene_with_settings;
use prismlab::core::tracer::Tracer;
use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scene.xml> [--max-depth N]", args[0]);
        std::process::exit(1);
    }

    let scene_path = &args[1];
    let mut max_depth: Option<u32> = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--max-depth" {
            i += 1;
            max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok());
        }
        i += 1;
    }

    let loaded = match load_scene_with_settings(scene_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load {}: {}", scene_path, e);
            std::process::exit(1);
        }
    };
    let tracer = max_depth.map_or(loaded.tracer, |d| loaded.tracer.with_max_depth(d));
    let laser = loaded.laser.unwrap_or_default();

    println!("trace_ray_tree: scene={} prisms={} {}", scene_path, loaded.scene.len(), tracer.describe());
    let rays = tracer.trace(&loaded.scene, &laser);
    if rays.is_empty() {
        println!("no light: laser is off or outside the scene bounds");
        return;
    }

    for (idx, ray) in rays.iter().enumerate() {
        let phase = ray.phase.map_or(String::from("-"), |p| format!("{:.4}", p));
        let [r, g, b] = ray.color.to_rgb8();
        println!(
            "#{:<4} depth={:<3} lambda={:.0}nm #{:02x}{:02x}{:02x} n={:.5} power={:.6} tail=({:.4}, {:.4}) tip=({:.4}, {:.4}) phase={}",
            idx, ray.depth, ray.wavelength, r, g, b, ray.medium_index, ray.power,
            ray.tail.x, ray.tail.y, ray.tip.x, ray.tip.y, phase
        );
    }

    let total: f64 = rays.iter().filter(|r| r.depth == 0).map(|r| r.power).sum();
    println!("segments: {} source power: {:.6}", rays.len(), total);
}

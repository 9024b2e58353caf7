//! Example: Load an OBJ model and summarise its triangles.
//!
//! Run with: cargo run -p glint_core --example inspect_obj -- scenes/room.obj [material]

use std::env;

use glint_core::{load_obj, LightRig, ModelOptions, Scene};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: inspect_obj <path-to-obj> [material]");
        println!("\nMaterials: cornell, checker, hackspace, sphere, bump");
        return;
    }

    let path = &args[1];
    let tag = args.get(2).map(String::as_str).unwrap_or("cornell");
    let options = match ModelOptions::from_tag(tag) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match load_obj(path, &options) {
        Ok(triangles) => {
            let mut scene = Scene::new(path.as_str(), LightRig::new(Default::default()));
            scene.add_triangles(triangles);
            scene.smooth_normals(false);

            println!("\n=== {} ===", scene.name);
            println!("Triangles: {}", scene.triangle_count());
            println!("Reflective: {}", scene.reflective_count());
            println!("Refractive: {}", scene.refractive_count());

            for (i, tri) in scene.triangles.iter().take(8).enumerate() {
                let [r, g, b] = [tri.colour.red, tri.colour.green, tri.colour.blue];
                println!(
                    "  [{}] normal {:?} colour ({}, {}, {}) material {}",
                    i,
                    tri.face_normal(),
                    r,
                    g,
                    b,
                    tri.material
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

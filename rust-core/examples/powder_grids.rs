/// Example walking through the three services: loading crystallite sets,
/// reading a triangulation and mapping a fine grid onto a coarse one.
use std::fs;

use powder_crystallites::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Crystallite grids for powder averaging ===\n");

    // Example 1: Built-in catalog
    println!("1. Built-in crystallite sets:");
    let loader = CrystalliteLoader::default();
    println!("   {}\n", loader.catalog().names().join(" "));

    // Example 2: Load a built-in set and a slice of it
    println!("2. Loading zcw89:");
    let coarse = loader.load("zcw89", 1, -1, Verbosity::Quiet)?;
    println!("   Crystallites: {}", coarse.len());
    println!("   Weight sum: {:.12}", coarse.sum_weights());
    let slice = loader.load("zcw89", 10, 19, Verbosity::Quiet)?;
    println!("   Crystallites 10-19 weight sum: {:.6}\n", slice.sum_weights());

    // Example 3: External crystallite and triangle files
    println!("3. Loading external files:");
    let dir = std::env::temp_dir().join("powder_grids_example");
    fs::create_dir_all(&dir)?;
    let cry = dir.join("three.cry");
    fs::write(&cry, "3\n10 20 0.5\n30 40 0.3\n50 60 0.2\n")?;
    let external = loader.load(dir.join("three").to_str().unwrap_or_default(), 1, -1, Verbosity::Quiet)?;
    for c in &external {
        println!("   alpha={:6.1} beta={:6.1} gamma={:4.1} weight={:.2}", c.alpha, c.beta, c.gamma, c.weight);
    }
    let tri = dir.join("three.tri");
    fs::write(&tri, "1 2 3\n")?;
    let mesh = load_triangle_file(tri.to_str().unwrap_or_default(), Verbosity::Quiet)?;
    println!("   Triangles: {}\n", mesh.len());

    // Example 4: Nearest-neighbour map, cached next to the example files
    println!("4. Mapping zcw377 onto zcw89:");
    let fine = loader.load("zcw377", 1, -1, Verbosity::Quiet)?;
    let mapper = NearestNeighborMapper::new(&dir);
    let map = mapper.map("zcw89", &coarse, "zcw377", &fine, Verbosity::Quiet)?;
    println!("   Cache file: {}", mapper.cache_path("zcw89", "zcw377").display());
    for (target, source) in map.iter().take(5) {
        println!("   target {:4} -> source {:4}", target, source);
    }

    Ok(())
}

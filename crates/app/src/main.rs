//! Headless front end for the terraced terrain generator.
//!
//! Loads `config.ron`, runs each generation pass on a background worker and
//! polls it once per frame the way a render loop would, keeping the last
//! good mesh on display.

mod config;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use terrace::{MeshSlot, TerrainMesh};

use crate::config::{config_path, AppConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(config_path);
    if !path.exists() {
        log::info!("No config at {:?}, writing defaults", path);
        AppConfig::default().save(&path);
    }
    let config = AppConfig::load(&path);
    config.generator.validate()?;

    println!("╔══════════════════════════════════════════════╗");
    println!("║               Terraced Terrain               ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  noise    {:<35}║", config.generator.noise);
    println!("║  theme    {:<35}║", config.generator.theme);
    println!(
        "║  polygon  {:<35}║",
        format!("{} sides, radius {}", config.generator.segments, config.generator.radius)
    );
    println!(
        "║  detail   {:<35}║",
        format!("depth {}, {} octaves", config.generator.max_depth, config.generator.octaves)
    );
    println!("╚══════════════════════════════════════════════╝");

    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let mut slot = MeshSlot::new();

    for run in 1..=config.runs {
        slot.request(config.generator.clone())?;
        let mut frames = 0u64;

        while slot.is_busy() {
            if slot.update() {
                break;
            }
            frames += 1;
            thread::sleep(poll_interval);
        }

        log::info!("Pass {}/{} done after {} frames", run, config.runs, frames);
        match slot.current() {
            Some(mesh) if mesh.is_empty() => log::warn!("Pass {} produced an empty mesh", run),
            Some(mesh) => report(mesh),
            None => {}
        }
    }

    if slot.generation() == 0 {
        anyhow::bail!("no terrain mesh was generated");
    }
    Ok(())
}

fn report(mesh: &TerrainMesh) {
    println!(
        "vertices: {}  triangles: {}  floats: {}",
        mesh.vertex_count,
        mesh.triangle_count(),
        mesh.vertices.len()
    );
    if let Some((min, max)) = mesh.bounds() {
        println!(
            "elevation: {:.2} .. {:.2}  ({} terrace bands)",
            min.z,
            max.z,
            terrace::band_index(max.z) - terrace::band_index(min.z) + 1
        );
    }
}

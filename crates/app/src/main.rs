//! Entry point: load an OBJ, flatten it, then view it or print a summary.

mod config;

use anyhow::{Context, Result};
use asset::{Bounds, FlatVertex, flatten_with, load_obj_from_path, texture::TextureData};

use crate::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = config::parse_args(std::env::args().skip(1))?;
    log::info!(
        "Starting Svarog OBJ viewer. Model: {:?}, uv_lookup={:?}, backend: {:?}, window_size={}x{}",
        cfg.model,
        cfg.uv_lookup,
        cfg.viewer.backends,
        cfg.viewer.width,
        cfg.viewer.height
    );

    let vertices = load_vertices(&cfg)?;

    if cfg.info_only {
        print_summary(&cfg, &vertices);
        return Ok(());
    }

    let texture = match &cfg.texture {
        Some(path) => TextureData::load_png(path)?,
        None => TextureData::checkerboard(256, 32),
    };

    platform::run_viewer(cfg.viewer, vertices, texture)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

fn load_vertices(cfg: &Config) -> Result<Vec<FlatVertex>> {
    let mesh = load_obj_from_path(&cfg.model)
        .with_context(|| format!("Failed to load mesh {}", cfg.model.display()))?;
    if let Err(err) = mesh.validate() {
        log::warn!("Mesh references missing attributes: {err}");
    }
    flatten_with(&mesh, cfg.uv_lookup)
        .with_context(|| format!("Failed to flatten mesh {}", cfg.model.display()))
}

fn print_summary(cfg: &Config, vertices: &[FlatVertex]) {
    println!("model:     {}", cfg.model.display());
    println!("uv lookup: {:?}", cfg.uv_lookup);
    println!("vertices:  {}", vertices.len());
    println!("triangles: {}", vertices.len() / 3);
    match Bounds::from_vertices(vertices) {
        Some(b) => println!("bounds:    {:?} .. {:?}", b.min, b.max),
        None => println!("bounds:    (empty)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_config(extra: &[&str]) -> Config {
        let cube = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/models/cube.obj");
        let mut args = vec![cube];
        args.extend_from_slice(extra);
        config::parse_args(args).unwrap()
    }

    #[test]
    fn shipped_cube_flattens_in_both_modes() {
        let keyed = load_vertices(&cube_config(&[])).expect("position-keyed");
        let slot = load_vertices(&cube_config(&["--uv-lookup=slot"])).expect("slot-keyed");
        assert_eq!(keyed.len(), 36);
        assert_eq!(slot.len(), 36);

        let b = Bounds::from_vertices(&keyed).unwrap();
        assert_eq!(b.min, [-1.0, -1.0, -1.0]);
        assert_eq!(b.max, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_model_reports_path() {
        let cfg = config::parse_args(["/no/such/model.obj"]).unwrap();
        let err = load_vertices(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/model.obj"));
    }
}

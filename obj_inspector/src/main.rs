//! OBJ inspector
//!
//! Loads a Wavefront OBJ model through the configured asset archives and
//! logs what each material subset contains.
//!
//! ```text
//! obj_inspector [config.toml|config.ron] <model.obj>
//! ```

use std::path::Path;
use std::sync::Arc;

use simple_scene::foundation::logging;
use simple_scene::prelude::*;

fn load_config(path: Option<&str>) -> Result<ApplicationConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn inspect(config: &ApplicationConfig, model_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Arc::new(AssetResolver::from_config(&config.assets));
    for archive in resolver.archives() {
        log::info!("Archive: {}", archive.describe());
    }

    // Siblings of the model (libraries, textures) resolve by bare name
    let context = resolver.context_for_resource(model_path);
    let file_name = Path::new(model_path)
        .file_name()
        .map_or_else(|| model_path.to_string(), |name| name.to_string_lossy().into_owned());
    let mesh = ObjMesh::load(&context, &file_name)?;

    log::info!(
        "{}: {} subset(s), {} vertices, {} triangles",
        mesh.source_name(),
        mesh.subsets().len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    for subset in mesh.subsets() {
        log::info!(
            "  [{}] {} vertices, {} triangles, {} wireframe edges",
            subset.material_name,
            subset.vertices.len(),
            subset.triangle_count(),
            subset.edge_count()
        );
        for (slot, handle) in subset.material_textures.iter() {
            log::info!("    {slot}: {handle}");
        }
    }

    if let Some((min, max)) = mesh.bounds() {
        log::info!(
            "Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, model_path) = match args.as_slice() {
        [model] => (None, model.as_str()),
        [config, model] => (Some(config.as_str()), model.as_str()),
        _ => {
            eprintln!("usage: obj_inspector [config.toml|config.ron] <model.obj>");
            std::process::exit(2);
        }
    };

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    logging::init_with_level(&config.log_level);

    if let Err(e) = inspect(&config, model_path) {
        log::error!("Failed to inspect '{}': {}", model_path, e);
        std::process::exit(1);
    }
}

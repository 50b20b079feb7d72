// main.rs
//
// Command-line front end: partition an OBJ model (or a demo slab when no
// path is given) for a printer's working volume and write the parts.
//
//     chopper [model.obj] [width height length]
//
// Set RUST_LOG=debug to follow the beam search.

use std::{env, fs, process::ExitCode};

use chopper::{Mesh, PlannerConfig, WorkingVolume, float_types::Real};
use log::{error, info};
use nalgebra::Point3;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, dims) = match args.as_slice() {
        [] => (None, None),
        [path] => (Some(path.as_str()), None),
        [path, w, h, l] => (Some(path.as_str()), Some([w, h, l])),
        _ => {
            eprintln!("usage: chopper [model.obj] [width height length]");
            return ExitCode::FAILURE;
        },
    };

    let mut config = PlannerConfig::default();
    if let Some(dims) = dims {
        let parsed: Result<Vec<Real>, _> = dims.iter().map(|d| d.parse::<Real>()).collect();
        match parsed.as_deref() {
            Ok(&[w, h, l]) => config.volume = WorkingVolume::new(w, h, l),
            _ => {
                eprintln!("working volume must be three numbers");
                return ExitCode::FAILURE;
            },
        }
    }

    let mesh = match path {
        Some(path) => match load(path) {
            Some(mesh) => mesh,
            None => return ExitCode::FAILURE,
        },
        None => Mesh::cuboid(Point3::origin(), Point3::new(24.0, 18.0, 4.0)),
    };

    let tree = match chopper::plan(mesh, config.clone()) {
        Ok(tree) => tree,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        },
    };
    info!(
        "{} parts, all fit: {}",
        tree.num_leaves(),
        tree.fits_in_volume(&config.volume)
    );

    if let Err(err) = fs::create_dir_all("parts") {
        error!("creating parts/: {err}");
        return ExitCode::FAILURE;
    }

    #[cfg(feature = "obj-io")]
    if let Err(err) = fs::write("parts/parts.obj", tree.to_obj()) {
        error!("writing parts/parts.obj: {err}");
        return ExitCode::FAILURE;
    }

    #[cfg(feature = "stl-io")]
    match tree.leaves_to_stl("part") {
        Ok(parts) => {
            for (name, bytes) in parts {
                let path = format!("parts/{name}.stl");
                if let Err(err) = fs::write(&path, bytes) {
                    error!("writing {path}: {err}");
                    return ExitCode::FAILURE;
                }
            }
        },
        Err(err) => {
            error!("encoding STL: {err}");
            return ExitCode::FAILURE;
        },
    }

    ExitCode::SUCCESS
}

#[cfg(feature = "obj-io")]
fn load(path: &str) -> Option<Mesh> {
    Mesh::from_obj_file(path)
        .map_err(|err| error!("reading {path}: {err}"))
        .ok()
}

#[cfg(not(feature = "obj-io"))]
fn load(path: &str) -> Option<Mesh> {
    error!("cannot read {path}: built without the obj-io feature");
    None
}

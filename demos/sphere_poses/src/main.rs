use argh::FromArgs;
use glam::DVec3;
use serde::Serialize;
use std::path::PathBuf;

use cvkit::k3d::{geometry, io::ply, mesh::TriMesh};
use cvkit::serialize::save_yaml;

#[derive(FromArgs)]
/// Place cameras on a sphere looking at the origin and save their poses
struct Args {
    /// number of cameras
    #[argh(option, short = 'n', default = "50")]
    num_cameras: usize,

    /// sphere radius
    #[argh(option, short = 'r', default = "3.0")]
    radius: f64,

    /// yaml file receiving the 4x4 poses
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// optional ply file receiving the camera centers
    #[argh(option)]
    ply: Option<PathBuf>,
}

#[derive(Serialize)]
struct CameraPose {
    location: [f64; 3],
    /// row major 4x4 matrix
    pose: [[f64; 4]; 4],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let points = geometry::sample_sphere(args.num_cameras);
    let poses = points
        .iter()
        .map(|p| {
            let location = p.as_dvec3() * args.radius;
            let pose = geometry::look_at(location, DVec3::ZERO);
            CameraPose {
                location: location.to_array(),
                pose: pose.transpose().to_cols_array_2d(),
            }
        })
        .collect::<Vec<_>>();

    save_yaml(&args.output, &poses)?;
    log::info!("saved {} poses to {}", poses.len(), args.output.display());

    if let Some(path) = args.ply {
        let vertices = poses
            .iter()
            .map(|c| c.location.map(|v| v as f32))
            .collect::<Vec<_>>();
        let mesh = TriMesh::new(vertices, None, None, Vec::new())?;
        ply::save_mesh(&path, &mesh)?;
        log::info!("saved camera centers to {}", path.display());
    }

    Ok(())
}

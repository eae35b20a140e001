//! Clip a mesh with a plane, fill the cross section, and report what was built.
//!
//! With no arguments this loads `panter.stl` and clips it with the plane
//! through the origin with normal `(0, -1, -1)`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use nalgebra::{Point3, Vector3};
use planeclip::float_types::Real;
use planeclip::{Pipeline, PipelineConfig, Scene, SceneConfig, io};

/// Clip a triangulated surface with a plane and build its cross section
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// STL file to load
    #[clap(short, long, default_value = "panter.stl")]
    input: PathBuf,

    /// A point on the cutting plane
    #[clap(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.0, 0.0], allow_negative_numbers = true)]
    origin: Vec<Real>,

    /// Cutting plane normal; need not be unit length
    #[clap(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, -1.0, -1.0], allow_negative_numbers = true)]
    normal: Vec<Real>,

    /// Plane offset at which to clip and cut
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    value: Real,

    /// Iso-value at which the sampled plane is contoured
    #[clap(long, default_value_t = 0.5, allow_negative_numbers = true)]
    contour_value: Real,

    /// Samples per axis when sampling the plane
    #[clap(long, num_args = 3, value_names = ["NX", "NY", "NZ"], default_values_t = [50, 50, 50])]
    dimensions: Vec<usize>,

    /// Write each scene actor to this directory as `.stl`
    #[clap(short, long)]
    export_dir: Option<PathBuf>,
}

fn triple<T: Copy>(values: &[T]) -> anyhow::Result<[T; 3]> {
    values
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected 3 values, got {}", values.len()))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let [ox, oy, oz] = triple(&args.origin)?;
    let [nx, ny, nz] = triple(&args.normal)?;
    let mut config = PipelineConfig {
        plane_origin: Point3::new(ox, oy, oz),
        plane_normal: Vector3::new(nx, ny, nz),
        ..Default::default()
    };
    config.clip.value = args.value;
    config.cut.values = vec![args.value];
    config.contour.values = vec![args.contour_value];
    config.sample.dimensions = triple(&args.dimensions)?;

    let pipeline = Pipeline::new(config)?;
    println!("plane info: {}", pipeline.plane());

    let now = Instant::now();
    let source = io::read_stl_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!("loaded {} in {:?}", args.input.display(), now.elapsed());

    let now = Instant::now();
    let output = pipeline.run(&source)?;
    info!("pipeline finished in {:?}", now.elapsed());
    println!("{}", output.stats);

    let scene = Scene::from_output(&output, &SceneConfig::default());
    if let Some(dir) = &args.export_dir {
        scene.export_stl(dir)?;
    }

    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}

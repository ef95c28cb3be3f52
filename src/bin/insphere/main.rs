//! Insphere CLI - inscribed spheres of Platonic solids.
//!
//! Usage: insphere <COMMAND> [OPTIONS]
//!
//! Run `insphere --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;

use insphere::io;
use insphere::prelude::{
    compute_and_render, compute_polyhedron, Insphere, InsphereError, InsphereOptions, Polyhedron,
    RenderStyle, SceneExporter, SolidKind,
};

#[derive(Parser)]
#[command(name = "insphere")]
#[command(author, version, about = "Inscribed spheres of Platonic solids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Reduce verbosity to warnings only
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the insphere of a polyhedron loaded from a file
    Compute {
        /// Input mesh file (OBJ, PLY or STL)
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compute the insphere of a canonical Platonic solid
    Solid {
        /// Solid name (tetrahedron, octahedron, cube, icosahedron, dodecahedron)
        kind: SolidKind,

        /// Circumradius of the generated solid
        #[arg(short = 'r', long, default_value_t = 1.0)]
        circumradius: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a canonical Platonic solid to a mesh file
    Generate {
        /// Solid name (tetrahedron, octahedron, cube, icosahedron, dodecahedron)
        kind: SolidKind,

        /// Output mesh file (OBJ, PLY or STL)
        output: PathBuf,

        /// Circumradius of the generated solid
        #[arg(short = 'r', long, default_value_t = 1.0)]
        circumradius: f64,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Sphere sampling resolution (steps per angle, at least 3)
    #[arg(short, long, default_value_t = insphere::insphere::DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Skip sampling the sphere surface
    #[arg(long, conflicts_with = "render")]
    no_mesh: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Export the polyhedron, insphere and center marker to a mesh file
    #[arg(long, value_name = "FILE")]
    render: Option<PathBuf>,

    /// Size of the center marker in the exported scene (0 to omit)
    #[arg(long, default_value_t = 0.02)]
    marker_size: f64,
}

/// Machine-readable result.
#[derive(Serialize)]
struct JsonOutput {
    solid: String,
    center: [f64; 3],
    radius: f64,
    circumradius: f64,
    edge_length: f64,
    face_radius: f64,
    mesh_points: Option<usize>,
}

impl From<&Insphere> for JsonOutput {
    fn from(sphere: &Insphere) -> Self {
        Self {
            solid: sphere.solid.to_string(),
            center: [sphere.center.x, sphere.center.y, sphere.center.z],
            radius: sphere.radius,
            circumradius: sphere.circumradius,
            edge_length: sphere.edge_length,
            face_radius: sphere.face_radius,
            mesh_points: sphere.mesh.as_ref().map(|m| m.len()),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Compute { input, output } => {
            let poly = io::load(&input)?;
            cmd_compute(&poly, &output)?;
        }

        Commands::Solid {
            kind,
            circumradius,
            output,
        } => {
            let poly = canonical(kind, circumradius)?;
            cmd_compute(&poly, &output)?;
        }

        Commands::Generate {
            kind,
            output,
            circumradius,
        } => {
            let poly = canonical(kind, circumradius)?;
            io::save_polyhedron(&poly, &output)?;
            println!(
                "Saved {} ({} vertices, {} faces): {}",
                kind,
                poly.num_vertices(),
                poly.num_faces(),
                output.display()
            );
        }
    }

    Ok(())
}

fn canonical(kind: SolidKind, circumradius: f64) -> insphere::Result<Polyhedron> {
    if !(circumradius.is_finite() && circumradius > 0.0) {
        return Err(InsphereError::invalid_param(
            "circumradius",
            circumradius,
            "must be positive and finite",
        ));
    }
    debug!("Generating {} with circumradius {}", kind, circumradius);
    Ok(Polyhedron::platonic(kind, circumradius))
}

fn cmd_compute(poly: &Polyhedron, args: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = InsphereOptions::default()
        .with_sample_count(args.samples)
        .with_mesh(!args.no_mesh);

    let start = Instant::now();
    let sphere = match &args.render {
        Some(path) => render_to(poly, &options, path, args.marker_size)?,
        None => compute_polyhedron(poly, &options)?,
    };
    debug!("Computed in {:.2?}", start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::from(&sphere))?);
    } else {
        print_summary(&sphere);
    }

    Ok(())
}

fn render_to(
    poly: &Polyhedron,
    options: &InsphereOptions,
    path: &Path,
    marker_size: f64,
) -> insphere::Result<Insphere> {
    let style = RenderStyle::default().with_marker_size(marker_size);
    let mut exporter = SceneExporter::new(path).with_style(style);
    let sphere = compute_and_render(poly, options, &mut exporter)?;
    info!("Scene written to {}", path.display());
    Ok(sphere)
}

fn print_summary(sphere: &Insphere) {
    let c = sphere.center;
    println!("Solid: {}", sphere.solid);
    println!("Center: ({:.6}, {:.6}, {:.6})", c.x, c.y, c.z);
    println!("Radius: {:.6}", sphere.radius);
    println!("Circumradius: {:.6}", sphere.circumradius);
    println!("Edge length: {:.6}", sphere.edge_length);
    println!("Face radius: {:.6}", sphere.face_radius);
    if let Some(mesh) = &sphere.mesh {
        println!(
            "Mesh: {} x {} ({} points)",
            mesh.rows(),
            mesh.cols(),
            mesh.len()
        );
    }
}

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use iced::Size;
use rand::{rngs::StdRng, SeedableRng};

use gui::Scene;
use plate::{
    circle::Rgb,
    mask::{recolor, DigitMask, ImageMask},
    packing::{pack, PackingParameters},
};
use sim::{
    initial_parameters::InitialParameters, projection::Projector, system::System,
    units::{Float, DEFAULT_G},
};

mod gui;
mod plate;
mod sim;

#[derive(Parser, Debug)]
#[command(about = "Gravity in a box and a colorblind test plate")]
struct Cli {
    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand, Debug)]
enum Demo {
    /// Bodies bouncing around a 2D box
    Planar(SimulationArgs),
    /// Bodies in a 3D box, projected onto the screen
    Spatial {
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Depth of the box
        #[arg(long, default_value_t = 700.)]
        depth: Float,
        /// Mass shared by every body
        #[arg(long, default_value_t = 250.)]
        mass: Float,
    },
    /// Non-overlapping dots hiding a number
    Plate(PlateArgs),
}

#[derive(Args, Debug)]
struct SimulationArgs {
    /// Width of the window and the box
    #[arg(long, default_value_t = 700.)]
    width: Float,
    /// Height of the window and the box
    #[arg(long, default_value_t = 700.)]
    height: Float,
    #[arg(short = 'n', long, default_value_t = 25)]
    bodies: u32,
    #[arg(short = 'g', long, default_value_t = DEFAULT_G)]
    gravity: Float,
    /// Stop after this many ticks, 0 runs forever
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks simulated between two drawn frames
    #[arg(long, default_value_t = 4)]
    ticks_per_frame: u64,
}

#[derive(Args, Debug)]
struct PlateArgs {
    #[arg(short = 'n', long, default_value_t = 3000)]
    circles: usize,
    #[arg(long, default_value_t = 7.)]
    start_radius: Float,
    #[arg(long, default_value_t = 1.)]
    min_radius: Float,
    /// Rejected candidates in a row before the radius shrinks
    #[arg(long, default_value_t = 500)]
    max_fails: u32,
    /// Digits hidden in the plate
    #[arg(long, default_value = "74")]
    digits: String,
    /// Black and white picture to hide instead of digits, one pixel per plate unit
    #[arg(long, conflicts_with_all = ["digits", "plain"])]
    mask: Option<PathBuf>,
    /// Leave the plate without a hidden number
    #[arg(long)]
    plain: bool,
    #[arg(long)]
    seed: Option<u64>,
}

fn simulation_parameters<const D: usize>(
    args: &SimulationArgs,
    mut params: InitialParameters<D>,
    box_dimensions: [Float; D],
) -> Result<InitialParameters<D>> {
    ensure!(args.bodies > 0, "at least one body is needed");
    ensure!(args.gravity.is_finite(), "gravity must be a finite number");
    ensure!(args.ticks_per_frame > 0, "at least one tick per frame is needed");
    for (axis, dimension) in box_dimensions.iter().enumerate() {
        ensure!(
            dimension.is_finite() && *dimension > params.spawn_margin,
            "box dimension {} is {}, it must be finite and exceed {}",
            axis,
            dimension,
            params.spawn_margin
        );
    }
    params.body_count = args.bodies;
    params.box_dimensions = box_dimensions;
    params.gravitational_constant = args.gravity;
    params.max_ticks = (args.max_ticks > 0).then_some(args.max_ticks);
    params.seed = args.seed;
    Ok(params)
}

fn spatial_parameters(
    simulation: &SimulationArgs,
    depth: Float,
    mass: Float,
) -> Result<InitialParameters<3>> {
    ensure!(mass.is_finite() && mass > 0., "mass must be positive and finite");
    let mut params = simulation_parameters(
        simulation,
        InitialParameters::<3>::default(),
        [simulation.width, simulation.height, depth],
    )?;
    params.fixed_mass = Some(mass);
    Ok(params)
}

fn plate_scene(args: &PlateArgs) -> Result<Scene> {
    ensure!(args.circles > 0, "at least one circle is needed");
    ensure!(
        args.start_radius.is_finite() && args.min_radius.is_finite(),
        "circle radii must be finite"
    );
    ensure!(
        args.start_radius > args.min_radius,
        "start radius {} must exceed minimum radius {}",
        args.start_radius,
        args.min_radius
    );
    ensure!(args.max_fails > 0, "max fails must be positive");

    let params = PackingParameters {
        count: args.circles,
        start_radius: args.start_radius,
        min_radius: args.min_radius,
        max_fails: args.max_fails,
        seed: args.seed,
        ..PackingParameters::default()
    };
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut packing = pack(&params, &mut rng);
    log::info!(
        "Smallest radius {}, all {} circles placed: {}",
        packing.final_radius,
        params.count,
        !packing.exhausted
    );

    if let Some(path) = &args.mask {
        let mask = ImageMask::open(path)?;
        let painted = recolor(&mut packing.circles, &mask, Rgb::BLACK);
        log::info!("Hid {} in {} circles", path.display(), painted);
    } else if !args.plain {
        let mask = DigitMask::new(&args.digits, params.center, params.bounding_radius * 1.2)
            .with_context(|| format!("cannot hide {:?}, only digits 0-9 are supported", args.digits))?;
        let painted = recolor(&mut packing.circles, &mask, Rgb::BLACK);
        log::info!("Hid {:?} in {} circles", args.digits, painted);
    }
    Ok(Scene::Plate(packing.circles))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (scene, size, ticks_per_frame) = match &cli.demo {
        Demo::Planar(args) => {
            let params = simulation_parameters(
                args,
                InitialParameters::<2>::default(),
                [args.width, args.height],
            )?;
            let system = System::new(&params);
            (
                Scene::Planar(system),
                Size::new(args.width as f32, args.height as f32),
                args.ticks_per_frame,
            )
        }
        Demo::Spatial {
            simulation,
            depth,
            mass,
        } => {
            let params = spatial_parameters(simulation, *depth, *mass)?;
            let projector = Projector::for_box(params.box_dimensions);
            let system = System::new(&params);
            (
                Scene::Spatial { system, projector },
                Size::new(simulation.width as f32, simulation.height as f32),
                simulation.ticks_per_frame,
            )
        }
        Demo::Plate(args) => {
            let params = PackingParameters::default();
            let side = (params.center.x * 2.) as f32;
            (plate_scene(args)?, Size::new(side, side), 0)
        }
    };

    gui::run(scene, size, ticks_per_frame)?;
    Ok(())
}

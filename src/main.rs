use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumen_core::{blackbody_to_hex, DVec2, EfficacyPreset, LuxTarget, RoomCatalog};
use lumenkit::assets::{AssetCategory, AssetLoader};
use lumenkit::error::AppError;
use lumenkit::models::{AppConfig, Scene};
use lumenkit::services::{
    apply_lighting, compute_strength, resolve_area, ApplyOptions, AreaSource, EmitterArea,
    HeightSource, RoomEstimator,
};

#[derive(Parser)]
#[command(name = "lumenkit")]
#[command(about = "Emission strength and room lighting calculator for 3D scenes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known room types and their lux / Kelvin ranges
    Rooms,
    /// Recommend lumens and color temperature for a room
    Recommend {
        /// Room type id (see `lumenkit rooms`)
        #[arg(short, long)]
        room: Option<String>,

        #[command(flatten)]
        room_args: RoomArgs,
    },
    /// Compute the emission strength for a light source
    Strength {
        /// Luminous flux in lumens
        #[arg(short, long)]
        lumens: Option<f64>,

        #[command(flatten)]
        efficacy: EfficacyArgs,

        /// Emitting area per light in m^2
        #[arg(short, long, conflicts_with = "object")]
        area: Option<f64>,

        /// Scene document to measure the emitting area in
        #[arg(short, long, requires = "object")]
        scene: Option<PathBuf>,

        /// Object whose active material faces form the emitting area
        #[arg(short, long, requires = "scene")]
        object: Option<String>,

        /// Number of lights sharing the material
        #[arg(short = 'n', long)]
        lights: Option<u32>,
    },
    /// Recommend, compute and write emission settings into a scene
    Apply {
        /// Scene document (.yaml, .yml or .json)
        #[arg(short, long)]
        scene: PathBuf,

        /// Emitting object
        #[arg(short, long)]
        object: String,

        /// Room type id
        #[arg(short, long)]
        room: Option<String>,

        /// Which recommendation to use: min, avg or max
        #[arg(short, long)]
        target: Option<LuxTarget>,

        #[command(flatten)]
        efficacy: EfficacyArgs,

        #[arg(short = 'n', long)]
        lights: Option<u32>,

        /// Rebuild the material as a glass-bulb lamp first
        #[arg(long)]
        make_lamp: bool,

        /// Where to write the result (defaults to the input scene)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        room_args: RoomArgs,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract sample scenes
        #[arg(long)]
        scenes: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[derive(Args)]
struct EfficacyArgs {
    /// Efficacy preset: led, incandescent, ideal-green, natural, bright, very-bright
    #[arg(short, long, conflicts_with = "efficacy")]
    preset: Option<EfficacyPreset>,

    /// Custom luminous efficacy in lm/W
    #[arg(short, long)]
    efficacy: Option<f64>,
}

impl EfficacyArgs {
    fn resolve(&self, fallback: EfficacyPreset) -> EfficacyPreset {
        match (self.preset, self.efficacy) {
            (Some(preset), _) => preset,
            (None, Some(value)) => EfficacyPreset::Custom(value),
            (None, None) => fallback,
        }
    }
}

/// Where the room's floor area and ceiling height come from
#[derive(Args)]
struct RoomArgs {
    /// Floor area in m^2
    #[arg(long, conflicts_with_all = ["corner_a", "walls"])]
    room_area: Option<f64>,

    /// First floor corner as "x,y"
    #[arg(long, value_parser = parse_point, requires = "corner_b", conflicts_with = "walls")]
    corner_a: Option<DVec2>,

    /// Opposite floor corner as "x,y"
    #[arg(long, value_parser = parse_point, requires = "corner_a")]
    corner_b: Option<DVec2>,

    /// Scene objects outlining the floor, comma separated
    #[arg(long, value_delimiter = ',')]
    walls: Vec<String>,

    /// Ceiling height in m
    #[arg(long, conflicts_with_all = ["floor_z", "height_object"])]
    height: Option<f64>,

    /// Floor elevation in m
    #[arg(long, requires = "ceiling_z")]
    floor_z: Option<f64>,

    /// Ceiling elevation in m
    #[arg(long, requires = "floor_z")]
    ceiling_z: Option<f64>,

    /// Scene object whose vertical extent is the ceiling height
    #[arg(long)]
    height_object: Option<String>,

    /// Scene document for --walls and --height-object (recommend only;
    /// apply reads them from its own scene)
    #[arg(long)]
    room_scene: Option<PathBuf>,
}

impl RoomArgs {
    fn area_source(&self, config: &AppConfig) -> AreaSource {
        if let (Some(a), Some(b)) = (self.corner_a, self.corner_b) {
            AreaSource::Corners(a, b)
        } else if !self.walls.is_empty() {
            AreaSource::Objects(self.walls.clone())
        } else {
            AreaSource::Manual(self.room_area.unwrap_or(config.defaults.room_area))
        }
    }

    fn height_source(&self, config: &AppConfig) -> HeightSource {
        if let (Some(floor_z), Some(ceiling_z)) = (self.floor_z, self.ceiling_z) {
            HeightSource::Elevations { floor_z, ceiling_z }
        } else if let Some(name) = &self.height_object {
            HeightSource::Object(name.clone())
        } else {
            HeightSource::Manual(self.height.unwrap_or(config.defaults.room_height))
        }
    }
}

/// Parse "x,y" into a point
fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate \"{v}\": {e}"))
    };
    Ok(DVec2::new(parse(x)?, parse(y)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumenkit=warn,lumen_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Rooms) => {
            let (_, catalog) = load_config()?;
            run_rooms_command(&catalog);
            Ok(())
        }
        Some(Commands::Recommend { room, room_args }) => run_recommend_command(room, &room_args),
        Some(Commands::Strength {
            lumens,
            efficacy,
            area,
            scene,
            object,
            lights,
        }) => run_strength_command(lumens, &efficacy, area, scene, object, lights),
        Some(Commands::Apply {
            scene,
            object,
            room,
            target,
            efficacy,
            lights,
            make_lamp,
            output,
            room_args,
        }) => {
            if room_args.room_scene.is_some() {
                anyhow::bail!("--room-scene is not used by apply; geometry objects are read from --scene");
            }
            let (config, catalog) = load_config()?;
            let options = ApplyOptions {
                object,
                room_type: room.unwrap_or_else(|| config.defaults.room_type.clone()),
                area: room_args.area_source(&config),
                height: room_args.height_source(&config),
                target: target.unwrap_or(config.defaults.target),
                efficacy: efficacy.resolve(config.defaults.efficacy),
                lights: lights.unwrap_or(config.defaults.lights),
                make_lamp,
            };
            run_apply_command(&scene, output.as_deref(), &options, catalog)
        }
        Some(Commands::Init {
            config,
            scenes,
            all,
            force,
            list,
        }) => run_init_command(config, scenes, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Load config.yaml (seeding CONFIG_FILE if it is missing) and build the room catalog
fn load_config() -> anyhow::Result<(AppConfig, RoomCatalog)> {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }
    let config = AppConfig::load_from_assets(&loader);
    let catalog = config.catalog().context("Invalid room configuration")?;
    Ok((config, catalog))
}

fn run_recommend_command(room: Option<String>, room_args: &RoomArgs) -> anyhow::Result<()> {
    let (config, catalog) = load_config()?;
    let estimator = RoomEstimator::new(catalog);
    let room = room.unwrap_or_else(|| config.defaults.room_type.clone());
    let scene = load_optional_scene(room_args.room_scene.as_deref())?;

    let geometry = estimator.estimate_geometry(
        &room_args.area_source(&config),
        &room_args.height_source(&config),
        &scene,
    )?;
    let recommendation = estimator
        .recommend(&room, &geometry)
        .map_err(manual_entry_hint)?;

    let entry = estimator.catalog().lookup(&room)?;
    println!("{} ({})", entry.label, entry.id);
    println!(
        "  Floor area {:.2} m^2, ceiling {:.2} m (height factor {:.3})",
        recommendation.floor_area, recommendation.ceiling_height, recommendation.height_factor
    );
    for target in LuxTarget::ALL {
        let kelvin = recommendation.kelvin(target);
        println!(
            "  {:<4} {:>10.0} lm  {:>6.0} K  {}",
            target,
            recommendation.lumens(target),
            kelvin,
            blackbody_to_hex(kelvin)
        );
    }
    Ok(())
}

fn run_strength_command(
    lumens: Option<f64>,
    efficacy: &EfficacyArgs,
    area: Option<f64>,
    scene: Option<PathBuf>,
    object: Option<String>,
    lights: Option<u32>,
) -> anyhow::Result<()> {
    let (config, _) = load_config()?;
    let scene_doc = load_optional_scene(scene.as_deref())?;
    let source = match object {
        Some(object) => EmitterArea::FromMaterial { object },
        None => EmitterArea::Manual(area.unwrap_or(config.defaults.area)),
    };

    let area = resolve_area(&source, &scene_doc)?;
    let efficacy = efficacy.resolve(config.defaults.efficacy);
    let lumens = lumens.unwrap_or(config.defaults.lumens);
    let lights = lights.unwrap_or(config.defaults.lights);

    let result = compute_strength(lumens, efficacy, area, lights)?;
    println!(
        "{lumens} lm at {} lm/W over {lights} x {area:.4} m^2",
        efficacy.efficacy()
    );
    println!("Emission strength: {:.4}", result.strength_watts);
    Ok(())
}

fn run_apply_command(
    scene_path: &Path,
    output: Option<&Path>,
    options: &ApplyOptions,
    catalog: RoomCatalog,
) -> anyhow::Result<()> {
    let estimator = RoomEstimator::new(catalog);
    let mut scene = load_optional_scene(Some(scene_path))?;

    let report = apply_lighting(&mut scene, &estimator, options).map_err(manual_entry_hint)?;

    let output = output.unwrap_or(scene_path);
    scene.save(output)?;

    println!(
        "{}: {:.0} lm ({}) over {:.4} m^2",
        report.material, report.lumens, options.target, report.emitter_area
    );
    println!("  Emission strength: {:.4}", report.strength.strength_watts);
    println!(
        "  Temperature:       {:.0} K {}",
        report.kelvin,
        blackbody_to_hex(report.kelvin)
    );
    println!("Wrote {}", output.display());
    Ok(())
}

fn load_optional_scene(path: Option<&Path>) -> anyhow::Result<Scene> {
    match path {
        Some(path) => Scene::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => Ok(Scene::default()),
    }
}

fn manual_entry_hint(error: AppError) -> anyhow::Error {
    if error.needs_manual_entry() {
        anyhow::anyhow!("{error}. Enter the floor area and ceiling height manually (--room-area, --height)")
    } else {
        error.into()
    }
}

fn run_rooms_command(catalog: &RoomCatalog) {
    println!(
        "{:<16} {:<28} {:>16} {:>18}",
        "ID", "ROOM", "LUX min/avg/max", "KELVIN min/rec/max"
    );
    for entry in catalog.iter() {
        println!(
            "{:<16} {:<28} {:>16} {:>18}",
            entry.id,
            entry.label,
            format!("{}/{}/{}", entry.min_lux, entry.avg_lux, entry.max_lux),
            format!(
                "{}/{}/{}",
                entry.min_kelvin, entry.recommended_kelvin, entry.max_kelvin
            )
        );
    }
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    scenes: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nScenes:");
        for f in AssetLoader::list_embedded(AssetCategory::Scenes) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || scenes {
        categories.push(AssetCategory::Scenes);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --scenes");
        eprintln!("\nRun 'lumenkit init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let loader = AssetLoader::from_env();

    println!("Lumenkit v{VERSION}");
    println!("Emission strength and room lighting calculator\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "  SCENES_DIR  = {}",
        std::env::var("SCENES_DIR").as_deref().unwrap_or("(not set)")
    );

    let config_source = match loader.config_file() {
        Some(path) if loader.uses_external_config() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig:  {config_source}");

    let config = AppConfig::load_from_assets(&loader);
    match config.catalog() {
        Ok(catalog) => println!("Rooms:   {} room types", catalog.len()),
        Err(e) => println!("Rooms:   invalid configuration ({e})"),
    }
    println!(
        "Scenes:  {} embedded",
        AssetLoader::list_embedded(AssetCategory::Scenes).len()
    );

    println!("\nCommands:");
    println!("  lumenkit rooms       List room types");
    println!("  lumenkit recommend   Recommend lumens and Kelvin for a room");
    println!("  lumenkit strength    Compute an emission strength");
    println!("  lumenkit apply       Write emission settings into a scene");
    println!("  lumenkit init        Extract embedded assets");
    println!("\nRun 'lumenkit --help' for more details.");
}

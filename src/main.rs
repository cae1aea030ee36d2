use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cannon_sim::core::ballistics::{self, FlightSummary};
use cannon_sim::core::mapper::DisplayConfig;
use cannon_sim::core::model::{PhysicsModel, Point};
use cannon_sim::core::params::{Parameter, ParameterSet};
use cannon_sim::core::playback::{DEFAULT_TICK_S, Phase, PlaybackController, SummaryMetrics};
use cannon_sim::core::window::ChartWindow;
use clap::{Parser, ValueEnum};
use plotters::prelude::*;
use serde::Serialize;

const PREVIEW_SAMPLES: usize = 200;
const CHART_SIZE_PX: (u32, u32) = (1200, 700);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModelArg {
    Analytic,
    Drag,
}

impl From<ModelArg> for PhysicsModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Analytic => PhysicsModel::Analytic,
            ModelArg::Drag => PhysicsModel::Drag,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Fire one cannon shot headlessly and report where it lands.
#[derive(Parser, Debug)]
#[command(name = "cannon_sim", version, about)]
struct Cli {
    /// Launch speed (m/s)
    #[arg(short = 'v', long)]
    speed: Option<f64>,

    /// Launch angle (degrees)
    #[arg(short = 'a', long)]
    angle: Option<f64>,

    /// Projectile mass (kg), drag model only
    #[arg(short = 'm', long)]
    mass: Option<f64>,

    /// Gravity (m/s^2)
    #[arg(short = 'g', long)]
    gravity: Option<f64>,

    /// Air density (kg/m^3), drag model only
    #[arg(long)]
    air_density: Option<f64>,

    /// Drag coefficient, drag model only
    #[arg(long)]
    drag_coefficient: Option<f64>,

    /// Cross-section area (m^2), drag model only
    #[arg(long)]
    cross_section: Option<f64>,

    /// Target distance (m), shown on the chart only
    #[arg(long)]
    target_distance: Option<f64>,

    /// JSON parameter file; flags override its values
    #[arg(short = 'p', long)]
    params: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "analytic")]
    model: ModelArg,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = DEFAULT_TICK_S)]
    dt: f64,

    /// Give up after this much simulated time (s)
    #[arg(long, default_value_t = 120.0)]
    max_time: f64,

    #[arg(short = 'o', long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Write a PNG chart of the flight (default name is timestamped)
    #[arg(long, num_args = 0..=1)]
    plot: Option<Option<PathBuf>>,

    /// Print the effective parameters as JSON and exit
    #[arg(long)]
    dump_params: bool,
}

impl Cli {
    fn overrides(&self) -> [(Parameter, Option<f64>); 8] {
        [
            (Parameter::LaunchSpeed, self.speed),
            (Parameter::LaunchAngle, self.angle),
            (Parameter::Mass, self.mass),
            (Parameter::Gravity, self.gravity),
            (Parameter::AirDensity, self.air_density),
            (Parameter::DragCoefficient, self.drag_coefficient),
            (Parameter::CrossSection, self.cross_section),
            (Parameter::TargetDistance, self.target_distance),
        ]
    }
}

#[derive(Serialize)]
struct Report {
    model: PhysicsModel,
    params: ParameterSet,
    prediction: Option<FlightSummary>,
    phase: Phase,
    elapsed_s: f64,
    metrics: SummaryMetrics,
    ticks: usize,
}

fn load_params(path: Option<&Path>) -> Result<ParameterSet> {
    let Some(path) = path else {
        return Ok(ParameterSet::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read parameter file '{}'", path.display()))?;
    let params: ParameterSet = serde_json::from_str(&text)
        .with_context(|| format!("Invalid parameter file '{}'", path.display()))?;
    Ok(params.sanitized())
}

fn effective_params(cli: &Cli) -> Result<ParameterSet> {
    let mut params = load_params(cli.params.as_deref())?;
    for (parameter, value) in cli.overrides() {
        if let Some(value) = value {
            let stored = params.set(parameter, value)?;
            if stored != value {
                log::warn!("{parameter} {value} is out of range, using {stored}");
            }
        }
    }
    Ok(params)
}

fn simulate(cli: &Cli, params: &ParameterSet) -> Result<(PlaybackController, Report)> {
    if !cli.dt.is_finite() || cli.dt <= 0.0 {
        bail!("--dt must be a positive number of seconds, got {}", cli.dt);
    }
    let model = PhysicsModel::from(cli.model);
    let mut controller = PlaybackController::new(model, DisplayConfig::default())?;
    controller.fire(params);

    let max_ticks = (cli.max_time.max(0.0) / cli.dt).ceil() as usize;
    controller.run_to_landing(params, cli.dt, max_ticks);

    let report = Report {
        model,
        params: *params,
        prediction: ballistics::flight_summary(params),
        phase: controller.phase(),
        elapsed_s: controller.elapsed_s(),
        metrics: controller.metrics(),
        ticks: controller.trajectory().len(),
    };
    Ok((controller, report))
}

fn print_table(report: &Report) {
    let p = &report.params;
    println!("Model: {}", report.model);
    println!(
        "Launch: {:.2} m/s at {:.1} deg, g = {:.2} m/s^2",
        p.launch_speed_mps, p.launch_angle_deg, p.gravity_mps2
    );
    if report.model == PhysicsModel::Drag {
        println!(
            "Drag: mass {:.2} kg, rho {:.3} kg/m^3, Cd {:.2}, A {:.3} m^2",
            p.mass_kg, p.air_density_kgpm3, p.drag_coefficient, p.cross_section_m2
        );
    }

    println!();
    match report.prediction {
        Some(summary) => {
            println!("Closed form (no drag):");
            println!("  Time of flight: {:.4} s", summary.time_of_flight_s);
            println!("  Range: {:.4} m", summary.range_m);
            println!("  Max height: {:.4} m", summary.max_height_m);
        }
        None => println!("Closed form (no drag): never lands (no gravity)"),
    }

    println!();
    println!("Simulated ({} ticks):", report.ticks);
    println!("  Max height: {:.2} m", report.metrics.max_height_m);
    match report.metrics.landing_distance_m {
        Some(distance) => {
            println!("  Distance: {distance:.2} m");
            println!("  Landed after: {:.4} s", report.elapsed_s);
        }
        None => println!(
            "  Still airborne after {:.2} s (never lands)",
            report.elapsed_s
        ),
    }
}

fn default_plot_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("trajectory-{stamp}.png"))
}

fn plot_flight(
    path: &Path,
    controller: &PlaybackController,
    params: &ParameterSet,
) -> Result<()> {
    let mapper = controller.display().mapper(params)?;
    let flown: Vec<Point> = controller
        .trajectory()
        .iter()
        .map(|&px| mapper.to_physical(px))
        .collect();
    let preview = ballistics::sample_trajectory(params, PREVIEW_SAMPLES);
    let window = ChartWindow::fitting(
        &[flown.as_slice(), preview.as_slice()],
        params.target_distance_m,
    );

    let root = BitMapBackend::new(path, CHART_SIZE_PX).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("Failed to clear chart: {e}"))?;

    let caption = format!(
        "{} model: {:.1} m/s at {:.1} deg",
        controller.active_model(),
        params.launch_speed_mps,
        params.launch_angle_deg
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..window.max_x_m, 0.0..window.max_y_m)
        .map_err(|e| anyhow::anyhow!("Failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(|e| anyhow::anyhow!("Failed to draw axes: {e}"))?;

    if !preview.is_empty() {
        chart
            .draw_series(LineSeries::new(
                preview.iter().map(|p| (p.x, p.y.max(0.0))),
                BLUE.mix(0.35).stroke_width(2),
            ))
            .map_err(|e| anyhow::anyhow!("Failed to draw preview: {e}"))?
            .label("closed form")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.mix(0.35)));
    }

    chart
        .draw_series(LineSeries::new(
            std::iter::once((0.0, 0.0)).chain(flown.iter().map(|p| (p.x, p.y.max(0.0)))),
            RED.stroke_width(3),
        ))
        .map_err(|e| anyhow::anyhow!("Failed to draw flight: {e}"))?
        .label("simulated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(std::iter::once(Circle::new(
            (params.target_distance_m, 0.0),
            8,
            RED.filled(),
        )))
        .map_err(|e| anyhow::anyhow!("Failed to draw target: {e}"))?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| anyhow::anyhow!("Failed to draw legend: {e}"))?;

    root.present()
        .map_err(|e| anyhow::anyhow!("Failed to write chart '{}': {e}", path.display()))?;
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let params = effective_params(&cli)?;

    if cli.dump_params {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let (controller, report) = simulate(&cli, &params)?;
    match cli.output {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(plot) = &cli.plot {
        let path = plot.clone().unwrap_or_else(default_plot_path);
        plot_flight(&path, &controller, &params)?;
        log::info!("wrote chart to {}", path.display());
        if matches!(cli.output, OutputFormat::Table) {
            println!("\nChart: {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

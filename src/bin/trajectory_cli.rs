use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use trajectory_engine::{
    launch_angles_for_distance, max_range_angle, run_dispersion_no_drag,
    run_dispersion_with_drag, solve_no_drag, CustomProjectile, DispersionParams,
    DispersionResults, DragIntegrator, FieldStatistics, ImpactAngleModel, LaunchAngles,
    LaunchParameters, ProjectileConfig, SimulationConfig, Trajectory,
};
use trajectory_engine::constants::{
    CANNONBALL_DIAMETER_M, CANNONBALL_MASS_KG, SPHERE_DRAG_COEFFICIENT,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trajectory-cli")]
#[command(version)]
#[command(about = "Projectile trajectories with and without air drag", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Closed-form trajectory in vacuum
    NoDrag {
        /// Launch velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long)]
        angle: f64,

        /// Launch height above the ground (meters)
        #[arg(long, default_value = "0.0")]
        height: f64,

        /// Number of sampling intervals
        #[arg(short = 's', long, default_value = "50")]
        samples: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Integrated trajectory with quadratic air drag
    Drag {
        /// Launch velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long)]
        angle: f64,

        /// Launch height above the ground (meters)
        #[arg(long, default_value = "0.0")]
        height: f64,

        #[command(flatten)]
        projectile: ProjectileArgs,

        /// Resample the path to this many evenly timed points
        #[arg(short = 's', long)]
        samples: Option<usize>,

        /// Integrator time step (seconds)
        #[arg(long, default_value = "0.001")]
        time_step: f64,

        /// How the landing angle is reported
        #[arg(long, default_value = "analytic")]
        impact_angle: AngleModel,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Launch angles that land a drag-free shot at a given distance
    Aim {
        /// Launch velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Target distance (meters)
        #[arg(long)]
        distance: f64,

        /// Launch height above the ground (meters)
        #[arg(long, default_value = "0.0")]
        height: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Find the launch angle with the longest drag-aware range
    Sweep {
        /// Launch velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Launch height above the ground (meters)
        #[arg(long, default_value = "0.0")]
        height: f64,

        #[command(flatten)]
        projectile: ProjectileArgs,

        /// Angle step (degrees)
        #[arg(long, default_value = "1.0")]
        resolution: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Run Monte Carlo simulation
    MonteCarlo {
        /// Base velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Base launch angle (degrees)
        #[arg(short = 'a', long)]
        angle: f64,

        /// Launch height above the ground (meters)
        #[arg(long, default_value = "0.0")]
        height: f64,

        /// Number of simulations
        #[arg(short = 'n', long, default_value = "1000")]
        num_sims: usize,

        /// Velocity standard deviation (m/s)
        #[arg(long, default_value = "0.5")]
        velocity_std: f64,

        /// Angle standard deviation (degrees)
        #[arg(long, default_value = "0.5")]
        angle_std: f64,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Integrate with air drag instead of the vacuum solution
        #[arg(long)]
        drag: bool,

        #[command(flatten)]
        projectile: ProjectileArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "summary")]
        output: MonteCarloOutput,
    },

    /// Run a simulation described by a JSON config file
    Run {
        /// Path to the config file
        #[arg(short = 'c', long)]
        config: PathBuf,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Display engine information
    Info,
}

#[derive(Args, Debug, Clone)]
struct ProjectileArgs {
    /// Use the 3 kg cannonball preset (the default)
    #[arg(long, conflicts_with_all = ["mass", "diameter", "drag_coefficient"])]
    cannonball: bool,

    /// Projectile mass (kg)
    #[arg(short = 'm', long)]
    mass: Option<f64>,

    /// Projectile diameter (meters)
    #[arg(short = 'd', long)]
    diameter: Option<f64>,

    /// Drag coefficient (defaults to 0.47 for a sphere)
    #[arg(long)]
    drag_coefficient: Option<f64>,
}

impl ProjectileArgs {
    fn to_projectile(&self) -> Result<ProjectileConfig, Box<dyn Error>> {
        if self.cannonball {
            return Ok(ProjectileConfig::Cannonball);
        }
        match (self.mass, self.diameter) {
            (Some(mass), Some(diameter)) => {
                let projectile = match self.drag_coefficient {
                    Some(cd) => CustomProjectile::new(mass, diameter, cd)?,
                    None => CustomProjectile::sphere(mass, diameter)?,
                };
                Ok(ProjectileConfig::Custom(projectile))
            }
            (None, None) if self.drag_coefficient.is_none() => Ok(ProjectileConfig::Cannonball),
            _ => Err("--mass and --diameter must be given together".into()),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MonteCarloOutput {
    Summary,
    Full,
    Statistics,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AngleModel {
    Analytic,
    TerminalVelocity,
}

impl From<AngleModel> for ImpactAngleModel {
    fn from(model: AngleModel) -> Self {
        match model {
            AngleModel::Analytic => ImpactAngleModel::Analytic,
            AngleModel::TerminalVelocity => ImpactAngleModel::TerminalVelocity,
        }
    }
}

#[derive(Debug, Serialize)]
struct PointRecord {
    time: f64,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct TrajectoryReport {
    air_time: f64,
    distance: f64,
    impact_angle_degrees: f64,
    impact_speed: f64,
    max_height: f64,
    sample_interval: f64,
    points: Vec<PointRecord>,
}

impl From<&Trajectory> for TrajectoryReport {
    fn from(t: &Trajectory) -> Self {
        TrajectoryReport {
            air_time: t.air_time(),
            distance: t.distance(),
            impact_angle_degrees: t.impact_angle_degrees(),
            impact_speed: t.impact_speed(),
            max_height: t.max_height(),
            sample_interval: t.sample_interval(),
            points: t
                .timed_points()
                .map(|(time, p)| PointRecord { time, x: p.x, y: p.y })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AimReport {
    velocity: f64,
    distance: f64,
    initial_height: f64,
    angles: Option<LaunchAngles>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::NoDrag {
            velocity, angle, height, samples, output, full
        } => {
            let trajectory = solve_no_drag(velocity, angle, height, samples)?;
            display_trajectory(&trajectory, output, full)?;
        }

        Commands::Drag {
            velocity, angle, height, projectile, samples,
            time_step, impact_angle, output, full
        } => {
            let projectile = projectile.to_projectile()?;

            let mut integrator = DragIntegrator::new();
            integrator.set_time_step(time_step);
            integrator.set_impact_angle_model(impact_angle.into());

            let trajectory = match samples {
                Some(n) => integrator.solve_sampled(&projectile, velocity, angle, height, n)?,
                None => integrator.solve(&projectile, velocity, angle, height)?,
            };
            display_trajectory(&trajectory, output, full)?;
        }

        Commands::Aim {
            velocity, distance, height, output
        } => {
            let angles = launch_angles_for_distance(velocity, distance, height)?;
            display_aim(
                &AimReport {
                    velocity,
                    distance,
                    initial_height: height,
                    angles,
                },
                output,
            )?;
        }

        Commands::Sweep {
            velocity, height, projectile, resolution, output
        } => {
            let projectile = projectile.to_projectile()?;
            let best = max_range_angle(&projectile, velocity, height, resolution)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&best)?),
                OutputFormat::Csv => {
                    println!("angle_degrees,distance,air_time");
                    println!("{:.2},{:.4},{:.4}", best.angle_degrees, best.distance, best.air_time);
                }
                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║         MAXIMUM RANGE SWEEP            ║");
                    println!("╠════════════════════════════════════════╣");
                    println!("║ Best Angle:        {:>8.2} deg        ║", best.angle_degrees);
                    println!("║ Distance:          {:>8.3} m          ║", best.distance);
                    println!("║ Air Time:          {:>8.3} s          ║", best.air_time);
                    println!("╚════════════════════════════════════════╝");
                }
            }
        }

        Commands::MonteCarlo {
            velocity, angle, height, num_sims, velocity_std,
            angle_std, seed, drag, projectile, output
        } => {
            let base = LaunchParameters::new(velocity, angle, height, 50);
            let params = DispersionParams {
                num_simulations: num_sims,
                velocity_std_dev: velocity_std,
                angle_std_dev_degrees: angle_std,
                seed,
            };

            let result = if drag {
                let projectile = projectile.to_projectile()?;
                run_dispersion_with_drag(&projectile, &base, &params)?
            } else {
                run_dispersion_no_drag(&base, &params)?
            };
            info!(valid = result.valid_runs, failed = result.failed_runs, "monte carlo done");

            display_monte_carlo_results(&result, output)?;
        }

        Commands::Run { config, output, full } => {
            let config = SimulationConfig::from_path(&config)?;
            let trajectory = config.run()?;
            display_trajectory(&trajectory, output, full)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      TRAJECTORY ENGINE v{:<15}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Planar projectile trajectories.        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Closed-form vacuum solution          ║");
            println!("║ • Quadratic drag integration           ║");
            println!("║ • Troposphere air density              ║");
            println!("║ • Launch angle solver                  ║");
            println!("║ • Monte Carlo dispersion               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Cannonball: {:>4.1} kg, {:>4.2} m, Cd {:.2}  ║",
                CANNONBALL_MASS_KG, CANNONBALL_DIAMETER_M, SPHERE_DRAG_COEFFICIENT);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(trajectory: &Trajectory, format: OutputFormat, full: bool) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&TrajectoryReport::from(trajectory))?);
        }

        OutputFormat::Csv => {
            println!("time,x,y");
            for (time, p) in trajectory.timed_points() {
                println!("{:.4},{:.4},{:.4}", time, p.x, p.y);
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Distance:          {:>8.4} m          ║", trajectory.distance());
            println!("║ Max Height:        {:>8.4} m          ║", trajectory.max_height());
            println!("║ Air Time:          {:>8.4} s          ║", trajectory.air_time());
            println!("║ Impact Angle:      {:>8.4} deg        ║", trajectory.impact_angle_degrees());
            println!("║ Impact Speed:      {:>8.4} m/s        ║", trajectory.impact_speed());
            println!("║ Points:            {:>8}            ║", trajectory.len());
            println!("╚════════════════════════════════════════╝");

            let step = if full { 1 } else { (trajectory.len() / 10).max(1) };
            if full {
                println!("\nFull Trajectory Points:");
            } else {
                println!("\nTrajectory Points (every {:.3}s):", trajectory.sample_interval() * step as f64);
            }
            println!("┌──────────┬──────────┬──────────┐");
            println!("│ Time (s) │  X (m)   │  Y (m)   │");
            println!("├──────────┼──────────┼──────────┤");
            let last = trajectory.len() - 1;
            for (i, (time, p)) in trajectory.timed_points().enumerate() {
                if i % step == 0 || i == last {
                    println!("│ {:>8.3} │ {:>8.3} │ {:>8.3} │", time, p.x, p.y);
                }
            }
            println!("└──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_aim(report: &AimReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            println!("low_degrees,high_degrees");
            if let Some(angles) = &report.angles {
                println!("{:.4},{:.4}", angles.low_degrees, angles.high_degrees);
            }
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         LAUNCH ANGLES                  ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Target Distance:   {:>8.3} m          ║", report.distance);
            match &report.angles {
                Some(angles) => {
                    println!("║ Low Angle:         {:>8.4} deg        ║", angles.low_degrees);
                    println!("║ High Angle:        {:>8.4} deg        ║", angles.high_degrees);
                }
                None => println!("║ Target out of reach                    ║"),
            }
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn statistics_rows(name: &str, unit: &str, stats: &FieldStatistics) {
    println!("║ {:<39}║", name);
    println!("║ Mean:              {:>8.3} {:<10}║", stats.mean, unit);
    println!("║ Std Dev:           {:>8.3} {:<10}║", stats.std, unit);
    println!("║ Min:               {:>8.3} {:<10}║", stats.min, unit);
    println!("║ Max:               {:>8.3} {:<10}║", stats.max, unit);
}

fn display_monte_carlo_results(result: &DispersionResults, format: MonteCarloOutput) -> Result<(), Box<dyn Error>> {
    match format {
        MonteCarloOutput::Summary => {
            println!("╔════════════════════════════════════════╗");
            println!("║      MONTE CARLO SIMULATION            ║");
            println!("║      {:>6} valid, {:>6} failed        ║", result.valid_runs, result.failed_runs);
            println!("╠════════════════════════════════════════╣");
            statistics_rows("DISTANCE", "m", &result.distance);
            println!("╠════════════════════════════════════════╣");
            statistics_rows("AIR TIME", "s", &result.air_time);
            println!("╠════════════════════════════════════════╣");
            statistics_rows("IMPACT ANGLE", "deg", &result.impact_angle);
            println!("╚════════════════════════════════════════╝");
        }

        MonteCarloOutput::Full => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }

        MonteCarloOutput::Statistics => {
            println!("metric,value");
            println!("valid_runs,{}", result.valid_runs);
            println!("failed_runs,{}", result.failed_runs);
            for (name, stats) in [
                ("distance", &result.distance),
                ("air_time", &result.air_time),
                ("impact_angle", &result.impact_angle),
            ] {
                println!("mean_{name},{:.4}", stats.mean);
                println!("std_{name},{:.4}", stats.std);
                println!("min_{name},{:.4}", stats.min);
                println!("max_{name},{:.4}", stats.max);
                for (p, value) in &stats.percentiles {
                    println!("p{:.0}_{name},{:.4}", p * 100.0, value);
                }
            }
        }
    }

    Ok(())
}

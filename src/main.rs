use articulator::config::EngineConfig;
use articulator::group::{GroupRegistry, Schedule};
use articulator::host::sim::{SimActuator, SimAssembly, SimController, SimDirectory};
use articulator::host::{ActuatorKind, ControllerClass, TracingDiagnostics};
use articulator::mapping::ControlInput;
use color_eyre::Result;
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Demo harness: a simulated crane-style assembly under a scripted operator.
#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = EngineConfig::load()?;
    info!("Engine config: {:?}", config);

    let seat = SimController::new(1, "Flight Seat", ControllerClass::CommandSeat);
    let boom = SimActuator::new(2, "Boom Rotor [qe:0.5]", ActuatorKind::Rotary);
    let mast = SimActuator::new(3, "Mast Piston [space_c:2]", ActuatorKind::Linear);

    let mut directory = SimDirectory::new();
    directory.add(
        SimAssembly::new("Articulated Assembly 1")
            .with_controller(seat.clone())
            .with_actuator(boom.clone())
            .with_actuator(mast.clone()),
    );

    seat.set_engaged(true);

    let mut registry = GroupRegistry::new(config, Box::new(TracingDiagnostics));

    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let started = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        interval.tick().await;

        // Scripted operator: slow roll and up/down sweep.
        let t = started.elapsed().as_secs_f32();
        seat.set_input(ControlInput {
            roll: t.sin(),
            up_down: (t / 2.0).cos(),
            ..Default::default()
        });

        let delta = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();

        if let Schedule::Immediate = registry.tick(delta, &directory) {
            // The registry asked for one extra cycle while a group is live.
            registry.tick(last_tick.elapsed().as_secs_f64(), &directory);
            last_tick = Instant::now();
        }

        info!(
            "boom: {:.3} rpm | mast: {:.3} m/s",
            boom.last_velocity(),
            mast.last_velocity()
        );
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

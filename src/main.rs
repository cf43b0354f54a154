use std::env;

use anyhow::{anyhow, Context, Result};
use env_logger::Env;
use log::info;

use scene_viewer::{
    help_text, run_interactive, LoopControl, MeshState, RecordingBackend,
    SceneLoop, SceneState, Trigger, ViewerConfig, WindowInitError,
};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    let config = ViewerConfig::default();
    print!("{}", help_text());

    if options.summary_only {
        return run_headless(&config, &options);
    }
    match run_interactive(config.clone()) {
        Ok(scene) => {
            print_final_state(scene.state());
            Ok(())
        }
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                run_headless(&config, &options)
            } else {
                Err(err)
            }
        }
    }
}

fn run_headless(config: &ViewerConfig, options: &CliOptions) -> Result<()> {
    let mut backend = RecordingBackend::new();
    for trigger in &options.presses {
        backend.push_press(*trigger);
    }

    let mut scene = SceneLoop::new(config);
    let mut idle_ticks = 0;
    // An exhausted script polls as an idle snapshot.
    while backend.remaining_inputs() > 0 || idle_ticks < options.ticks {
        if backend.remaining_inputs() == 0 {
            idle_ticks += 1;
        }
        if scene.tick(&mut backend)? == LoopControl::Exit {
            break;
        }
    }
    info!(
        "headless run finished after {} tick(s), {} frame(s) presented",
        scene.updates(),
        backend.frames_presented()
    );
    print_final_state(scene.state());
    Ok(())
}

fn print_final_state(state: &SceneState) {
    match state.mesh.state() {
        MeshState::Failed => println!("Mesh unavailable"),
        MeshState::Shown | MeshState::Hidden => {
            println!("Loaded mesh: {} vertices", state.mesh.vertices().len())
        }
    }
    println!(
        "Final scene: {} solid(s), gravity {}",
        state.solids.len(),
        if state.gravity { "on" } else { "off" }
    );
    for (index, solid) in state.solids.iter().enumerate() {
        let color = solid.color();
        println!(
            " - solid {index} lowest_y={} color=({}, {}, {}) landed={}",
            solid.lowest_y(),
            color.r,
            color.g,
            color.b,
            solid.ground_collision_detected()
        );
    }
}

struct CliOptions {
    summary_only: bool,
    presses: Vec<Trigger>,
    ticks: u64,
}

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut summary_only = false;
        let mut presses = Vec::new();
        let mut ticks = 0;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--summary-only" => summary_only = true,
                "--press" => {
                    let name = args
                        .next()
                        .ok_or_else(|| anyhow!("--press expects a key or mouse button name"))?;
                    let trigger = Trigger::from_name(&name)
                        .ok_or_else(|| anyhow!("Unknown key or button: {name}"))?;
                    presses.push(trigger);
                }
                "--ticks" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--ticks expects a number"))?;
                    ticks = value
                        .parse()
                        .with_context(|| format!("invalid tick count {value}"))?;
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: scene-viewer [--summary-only] [--press <NAME>]... [--ticks <N>]"
                    ));
                }
            }
        }
        Ok(Self {
            summary_only,
            presses,
            ticks,
        })
    }
}

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use recipe_core::{update, AppState, Msg, Phase};
use recipe_engine::{ClientSettings, EngineHandle};
use recipe_logging::{recipe_info, recipe_warn, LogDestination};

use super::effects::EffectRunner;
use super::input::{parse_line, Input, HELP};
use super::render::render;

/// Log level override, e.g. `RECIPE_LOG=debug`.
const LOG_LEVEL_ENV: &str = "RECIPE_LOG";
/// Log destination override: `file` (default), `terminal` or `both`.
const LOG_TARGET_ENV: &str = "RECIPE_LOG_TARGET";
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|name| recipe_logging::parse_level(&name))
        .unwrap_or(LevelFilter::Info);
    let destination = std::env::var(LOG_TARGET_ENV)
        .ok()
        .and_then(|name| recipe_logging::parse_destination(&name))
        .unwrap_or(LogDestination::File);
    recipe_logging::initialize(destination, level);
    if !dotenv_loaded {
        recipe_warn!("No .env file found, using process environment");
    }

    let settings = ClientSettings::from_env();
    settings
        .endpoint()
        .with_context(|| format!("invalid service base url {:?}", settings.base_url))?;
    recipe_info!("Generation service: {}", settings.base_url);

    let engine = EngineHandle::new(settings).context("failed to start recipe engine")?;
    let runner = EffectRunner::new(engine);
    let lines = spawn_stdin_reader();

    let mut state = AppState::new();
    println!("Recipe Predictor\n{HELP}\n");
    print_view(&mut state, true);

    loop {
        let mut answered_input = false;
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                answered_input = true;
                match parse_line(&line, state.view().rows.len()) {
                    Input::Quit => break,
                    Input::Help => println!("{HELP}"),
                    Input::Msgs(msgs) => {
                        for msg in msgs {
                            state = dispatch(state, msg, &runner);
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // stdin closed: wait for an in-flight request, then leave.
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                if state.phase() != Phase::Loading {
                    break;
                }
                thread::sleep(POLL_INTERVAL);
            }
        }

        for msg in runner.pending_messages() {
            state = dispatch(state, msg, &runner);
        }
        state = dispatch(state, Msg::Tick, &runner);
        print_view(&mut state, answered_input);
    }

    recipe_info!("Exiting");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

/// Render when the state changed, or unconditionally to re-show the prompt.
fn print_view(state: &mut AppState, force: bool) {
    if !state.consume_dirty() && !force {
        return;
    }
    let view = state.view();
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}> ", render(&view));
    let _ = stdout.flush();
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

use clap::{Args, Subcommand};
use relaxzone_core::breathing::{BreathingController, BreathingSession, CycleState, PhaseDurations};
use relaxzone_core::{Config, Event};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const BAR_WIDTH: usize = 20;

#[derive(Args, Clone, Default)]
pub struct PatternArgs {
    /// Preset pattern, e.g. "8-6-6" or "4-4-6"
    #[arg(long)]
    preset: Option<String>,
    /// Inhale seconds (overrides preset and config)
    #[arg(long)]
    inhale: Option<u32>,
    /// Hold seconds (overrides preset and config)
    #[arg(long)]
    hold: Option<u32>,
    /// Exhale seconds (overrides preset and config)
    #[arg(long)]
    exhale: Option<u32>,
}

impl PatternArgs {
    fn resolve(&self, config: &Config) -> Result<PhaseDurations, Box<dyn std::error::Error>> {
        let base = match &self.preset {
            Some(name) => PhaseDurations::from_preset(name)?,
            None => config.durations()?,
        };
        Ok(PhaseDurations::new(
            self.inhale.unwrap_or(base.inhale_secs),
            self.hold.unwrap_or(base.hold_secs),
            self.exhale.unwrap_or(base.exhale_secs),
        )?)
    }
}

// Without a subcommand the exercise runs live.
#[derive(Args)]
pub struct BreatheArgs {
    #[command(subcommand)]
    pub action: Option<BreatheAction>,
    #[command(flatten)]
    pub live: LiveArgs,
}

#[derive(Args, Clone, Default)]
pub struct LiveArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,
    /// Stop after this many full cycles
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub cycles: Option<u64>,
    /// Print each state change as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Fast-forward the exercise and print the state after every second
    Simulate {
        #[command(flatten)]
        pattern: PatternArgs,
        /// Seconds to simulate
        #[arg(long, default_value = "20")]
        seconds: u32,
        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved breathing pattern
    Pattern {
        #[command(flatten)]
        pattern: PatternArgs,
    },
}

pub fn run(args: BreatheArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match args.action {
        None => {
            let LiveArgs {
                pattern,
                cycles,
                json,
            } = args.live;
            let durations = pattern.resolve(&config)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_live(durations, cycles, json))?;
        }
        Some(BreatheAction::Simulate {
            pattern,
            seconds,
            json,
        }) => {
            let durations = pattern.resolve(&config)?;
            simulate(durations, seconds, json)?;
        }
        Some(BreatheAction::Pattern { pattern }) => {
            let durations = pattern.resolve(&config)?;
            println!("{}", serde_json::to_string_pretty(&durations)?);
        }
    }
    Ok(())
}

async fn run_live(
    durations: PhaseDurations,
    cycles: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = BreathingSession::spawn(durations);
    let mut state = session.watch();
    let mut events = session.events();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    eprintln!(
        "Guided Breathing ({}): s=start p=pause r=reset q=quit",
        durations.pattern()
    );
    session.start()?;

    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *state.borrow_and_update();
                println!("{}", render(&current, &durations, json)?);
            }
            event = events.recv() => match event {
                Ok(Event::PhaseAdvanced { completed_cycles, .. })
                    if cycles.is_some_and(|limit| completed_cycles >= limit) =>
                {
                    break;
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            line = input.next_line(), if stdin_open => match line? {
                Some(line) => match line.trim() {
                    "s" | "start" => session.start()?,
                    "p" | "pause" => session.pause()?,
                    "r" | "reset" => session.reset()?,
                    "q" | "quit" => break,
                    "" => {}
                    other => eprintln!("unknown control '{other}' (s, p, r, q)"),
                },
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::debug!(final_state = ?session.snapshot(), "stopping live session");
    session.shutdown().await?;
    Ok(())
}

fn simulate(
    durations: PhaseDurations,
    seconds: u32,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = BreathingController::manual(durations);
    controller.start();
    print_at(0, &controller.snapshot(), &durations, json)?;
    for t in 1..=seconds {
        controller.advance_secs(1);
        print_at(t, &controller.snapshot(), &durations, json)?;
    }
    Ok(())
}

fn print_at(
    t: u32,
    state: &CycleState,
    durations: &PhaseDurations,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let line = serde_json::json!({
            "t": t,
            "phase": state.phase,
            "remaining_secs": state.remaining_secs,
            "running": state.running,
            "progress": state.progress(durations),
        });
        println!("{line}");
    } else {
        println!("t={t:>3}  {}", render(state, durations, false)?);
    }
    Ok(())
}

fn render(
    state: &CycleState,
    durations: &PhaseDurations,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string(state);
    }
    if !state.running {
        let note = if state.phase.is_active() { " (paused)" } else { "" };
        return Ok(format!("{}{note}", state.instruction()));
    }
    Ok(format!(
        "{:<14} {:>2}s [{}]",
        state.instruction(),
        state.remaining_secs,
        progress_bar(state.progress(durations))
    ))
}

fn progress_bar(ratio: f64) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

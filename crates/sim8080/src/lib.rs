pub mod cli;
pub mod config;
pub mod frontend;
pub mod program;

use std::fmt;

use anyhow::Result;
use sim8080_core::{Engine, RunState, StateView};

pub use config::RunConfig;
pub use frontend::{ConsoleFrontend, Frontend};

/// Why a driver run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finish {
    /// The program executed HLT.
    Halted,
    /// `RunConfig::max_steps` instructions ran without a HLT.
    StepLimit,
    /// The frontend asked to stop.
    Stopped,
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Finish::Halted => "Halted",
            Finish::StepLimit => "Step limit reached",
            Finish::Stopped => "Stopped",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub finish: Finish,
    pub steps: u64,
    pub state: StateView,
}

/// Load `program` at `config.origin` into a fresh engine and run it.
///
/// The frontend sees the initial state and the state after every step. The
/// run ends on HLT, on the step budget, or when the frontend asks to stop.
pub fn run(program: &[u8], config: &RunConfig, frontend: &mut impl Frontend) -> Result<RunReport> {
    let mut engine = Engine::new();
    engine.cpu_mut().pc = config.origin;
    engine.load(program);
    log::info!(
        "Running {} bytes from {:04X} (max {} steps)",
        program.len(),
        config.origin,
        config.max_steps
    );

    frontend.init()?;
    frontend.present(&engine.snapshot(), engine.touched(), engine.memory())?;

    let mut steps = 0u64;
    let finish = loop {
        if frontend.should_stop() {
            break Finish::Stopped;
        }
        if steps >= config.max_steps {
            break Finish::StepLimit;
        }
        let state = engine.step();
        steps += 1;
        frontend.present(&engine.snapshot(), engine.touched(), engine.memory())?;
        if state == RunState::Halted {
            break Finish::Halted;
        }
        if !config.clock.is_zero() {
            std::thread::sleep(config.clock);
        }
    };

    let report = RunReport {
        finish,
        steps,
        state: engine.snapshot(),
    };
    log::info!("{} after {} steps", report.finish, report.steps);
    frontend.exit(&report)?;
    Ok(report)
}

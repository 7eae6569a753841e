use std::io::Write;

use anyhow::Result;
use sim8080_core::{StateView, Touched};

use crate::config::RunConfig;
use crate::RunReport;

/// Presentation side of a run, driven by [`crate::run`].
pub trait Frontend {
    fn init(&mut self) -> Result<()>;
    /// Called once before the first step and after every step.
    fn present(&mut self, view: &StateView, touched: Touched, memory: &[u8]) -> Result<()>;
    /// Checked before every step; `true` halts the run early.
    fn should_stop(&self) -> bool;
    fn exit(&mut self, report: &RunReport) -> Result<()>;
}

/// Keeps touched registers highlighted for a number of presented steps.
#[derive(Debug, Default)]
pub struct Highlights {
    ttl: u32,
    live: Vec<(Touched, u32)>,
}

impl Highlights {
    pub fn new(ttl: u32) -> Self {
        Self {
            ttl,
            live: Vec::new(),
        }
    }

    /// Age every highlight by one step, refresh the ones in `touched`, and
    /// return the set that is currently lit.
    pub fn advance(&mut self, touched: Touched) -> Touched {
        if self.ttl == 0 {
            return Touched::empty();
        }
        for (_, left) in self.live.iter_mut() {
            *left = left.saturating_sub(1);
        }
        self.live.retain(|&(_, left)| left > 0);
        for flag in touched.iter() {
            match self.live.iter_mut().find(|(f, _)| *f == flag) {
                Some(entry) => entry.1 = self.ttl,
                None => self.live.push((flag, self.ttl)),
            }
        }
        self.lit()
    }

    pub fn lit(&self) -> Touched {
        self.live
            .iter()
            .fold(Touched::empty(), |acc, &(flag, _)| acc | flag)
    }
}

/// Text frontend: a register line with highlight markers plus a hex grid of
/// the start of memory.
pub struct ConsoleFrontend<W: Write> {
    out: W,
    highlights: Highlights,
    rows: usize,
    cols: usize,
    frames: u64,
}

impl<W: Write> ConsoleFrontend<W> {
    pub fn new(out: W, config: &RunConfig) -> Self {
        Self {
            out,
            highlights: Highlights::new(config.highlight_steps),
            rows: config.memory_rows,
            cols: config.memory_cols,
            frames: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_registers(&mut self, view: &StateView, lit: Touched) -> Result<()> {
        let cells: [(&str, Touched, String); 9] = [
            ("A", Touched::A, format!("{:02X}", view.a)),
            ("B", Touched::B, format!("{:02X}", view.b)),
            ("C", Touched::C, format!("{:02X}", view.c)),
            ("D", Touched::D, format!("{:02X}", view.d)),
            ("E", Touched::E, format!("{:02X}", view.e)),
            ("H", Touched::H, format!("{:02X}", view.h)),
            ("L", Touched::L, format!("{:02X}", view.l)),
            ("PC", Touched::PC, format!("{:04X}", view.pc)),
            ("SP", Touched::SP, format!("{:04X}", view.sp)),
        ];
        let line = cells
            .iter()
            .map(|(name, flag, value)| {
                let mark = if lit.contains(*flag) { "*" } else { " " };
                format!("{}={}{}", name, value, mark)
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            self.out,
            "#{:<5} {} IR={:02X} Z={} S={} P={} CY={}",
            self.frames,
            line,
            view.ir,
            view.flags.z as u8,
            view.flags.s as u8,
            view.flags.p as u8,
            view.flags.cy as u8,
        )?;
        Ok(())
    }

    fn write_memory(&mut self, memory: &[u8]) -> Result<()> {
        if self.cols == 0 {
            return Ok(());
        }
        let len = (self.rows * self.cols).min(memory.len());
        for (row, chunk) in memory[..len].chunks(self.cols).enumerate() {
            let bytes = chunk
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.out, "  {:04X}: {}", row * self.cols, bytes)?;
        }
        Ok(())
    }
}

impl<W: Write> Frontend for ConsoleFrontend<W> {
    fn init(&mut self) -> Result<()> {
        log::info!("Console frontend init");
        Ok(())
    }

    fn present(&mut self, view: &StateView, touched: Touched, memory: &[u8]) -> Result<()> {
        let lit = self.highlights.advance(touched);
        self.write_registers(view, lit)?;
        self.write_memory(memory)?;
        self.frames += 1;
        Ok(())
    }

    fn should_stop(&self) -> bool {
        false
    }

    fn exit(&mut self, report: &RunReport) -> Result<()> {
        writeln!(
            self.out,
            "{} after {} steps: {}",
            report.finish, report.steps, report.state
        )?;
        self.out.flush()?;
        log::info!("Console frontend exit");
        Ok(())
    }
}

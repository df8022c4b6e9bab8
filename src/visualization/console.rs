//! Terminal front end: real-time loop, keyboard decode, status view
//!
//! Owns the pacing loop. Raw key events are decoded into [`Command`]s and
//! applied between ticks; the view reads simulation state only after a tick
//! has fully completed, so it never observes a body mid-update. The drawing
//! itself is deliberately plain: a track line for the two bodies, a status
//! line, the latest energy readings and a one-line trend of the tracked
//! total.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::{cursor, execute, queue, terminal};
use tracing::{info, warn};

use crate::runtime::command::Command;
use crate::runtime::pacer::Pacer;
use crate::runtime::sim::Simulation;

const TRACK_WIDTH: usize = 60; // columns between the two anchors
const TREND_WIDTH: usize = 60; // columns of the energy trend line
const TREND_LEVELS: &[u8] = b" .:-=+*#%@";

pub fn run(mut sim: Simulation) -> Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    let outcome = event_loop(&mut sim);
    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    outcome
}

fn event_loop(sim: &mut Simulation) -> Result<()> {
    let mut pacer = Pacer::new(sim.parameters.frame_interval_ms);
    let mut deadline = Instant::now(); // fire the first tick immediately
    let mut fps = 0u32;
    let mut max_energy = 0.0f64;
    let mut notice = String::new();

    while sim.is_running() {
        // Wait out the remaining delay, draining key events as they arrive;
        // commands mutate the simulation only here, between ticks
        loop {
            let now = Instant::now();
            let Some(remaining) = deadline.checked_duration_since(now) else {
                break;
            };
            if remaining.is_zero() {
                break;
            }
            if event::poll(remaining)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(command) = decode_key(&key) {
                            match sim.apply(command) {
                                Ok(()) => notice.clear(),
                                Err(err) => {
                                    warn!(%err, "command rejected");
                                    notice = err.to_string();
                                }
                            }
                        }
                    }
                }
            }
        }
        if !sim.is_running() {
            break;
        }

        let tick = pacer.tick(Instant::now());
        if tick.run_steps {
            sim.tick();
        }
        if let Some(f) = tick.fps {
            fps = f;
        }
        deadline = Instant::now() + tick.next_delay;

        // Vertical scale for the trend line: pinned running maximum, or
        // rebuilt from the current window every tick
        let window_max = sim.histories.total.max_over_window();
        max_energy = if sim.rescale_each_tick() {
            window_max
        } else {
            max_energy.max(window_max)
        };

        draw(sim, fps, max_energy, &notice)?;
    }

    info!("simulation stopped");
    Ok(())
}

/// Map a raw key press to a discrete command
fn decode_key(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Enter => Some(Command::CommitFrequency),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char(']') => Some(Command::IncreaseHistory),
        KeyCode::Char('[') => Some(Command::DecreaseHistory),
        KeyCode::Char('+') => Some(Command::IncreaseSteps),
        KeyCode::Char('-') => Some(Command::DecreaseSteps),
        KeyCode::Char('r') => Some(Command::ToggleRescale),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Some(Command::AppendDigit(c)),
        _ => None,
    }
}

fn draw(sim: &Simulation, fps: u32, max_energy: f64, notice: &str) -> Result<()> {
    let e = sim.chain.energies();
    let paused = if sim.is_paused() { "  [paused]" } else { "" };

    let status = format!(
        "t={:8.2}  freq={:.4}  entry=\"{}\"  steps/tick={}  fps={}{}",
        sim.elapsed(),
        sim.frequency(),
        sim.pending_frequency(),
        sim.steps_per_tick(),
        fps,
        paused,
    );
    let energies = format!(
        "E1={:9.4}  E2={:9.4}  Ec={:9.4}  Etot={:9.4}  |F|={:7.4}  scale={:9.4}",
        e.body1_local(),
        e.body2_local(),
        e.coupling_spring,
        e.total(),
        sim.chain.external.force(sim.chain.t).abs(),
        max_energy,
    );

    let mut out = io::stdout();
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(out, Print(track_line(sim)), cursor::MoveTo(0, 2))?;
    queue!(out, Print(status), cursor::MoveTo(0, 3))?;
    queue!(out, Print(energies), cursor::MoveTo(0, 5))?;
    queue!(out, Print(trend_line(sim, max_energy)), cursor::MoveTo(0, 7))?;
    queue!(out, Print(notice), cursor::MoveTo(0, 9))?;
    queue!(
        out,
        Print("digits/. enter frequency, enter commit | space pause | [/] history | +/- steps | r rescale | q quit"),
    )?;
    out.flush()?;
    Ok(())
}

/// One-line picture of the track: anchors at both ends, the two bodies
/// placed proportionally in between
fn track_line(sim: &Simulation) -> String {
    let mut cells = vec![b'-'; TRACK_WIDTH + 1];
    let c1 = track_cell(sim.chain.body1.position, sim.chain.bound);
    let c2 = track_cell(sim.chain.body2.position, sim.chain.bound);
    cells[c1] = b'o';
    // Crossed or coincident bodies share a cell
    cells[c2] = if c2 == c1 { b'8' } else { b'O' };
    format!("|{}|", String::from_utf8_lossy(&cells))
}

fn track_cell(position: f64, bound: f64) -> usize {
    let frac = position / bound;
    if !frac.is_finite() {
        return 0;
    }
    ((frac * TRACK_WIDTH as f64).round().max(0.0) as usize).min(TRACK_WIDTH)
}

/// Most recent window of the total-energy history, scaled to `max_energy`
fn trend_line(sim: &Simulation, max_energy: f64) -> String {
    let history = &sim.histories.total;
    let skip = history.len().saturating_sub(TREND_WIDTH);
    let line: String = history
        .samples()
        .skip(skip)
        .map(|v| {
            let level = if max_energy > 0.0 && v.is_finite() {
                let frac = (v / max_energy).clamp(0.0, 1.0);
                (frac * (TREND_LEVELS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            TREND_LEVELS[level] as char
        })
        .collect();
    format!("Etot trend: {line}")
}

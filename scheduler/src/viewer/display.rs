use super::{runner::RunnerEvent, App, Panel};
use allocation_sim::files::{BlockRole, Slot};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame, Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const KEYS: &str = "q quit, p pause, r resume, s step, d direction, tab panel, n new scenario";
const BLOCKS_PER_ROW: usize = 10;
const GRID_WIDTH: u16 = BLOCKS_PER_ROW as u16 * 5 + 2;

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Input thread, stops once the receiving side is gone or the terminal fails
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, app: &App, paused: bool) -> io::Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let titles = Panel::ALL
                .iter()
                .map(|panel| Spans::from(panel.title()))
                .collect();
            let tabs = Tabs::new(titles)
                .select(app.panel().index())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .highlight_style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::LightBlue),
                );
            f.render_widget(tabs, chunks[0]);

            match app.panel() {
                Panel::Cpu => draw_cpu(f, chunks[1], app),
                Panel::Disk => draw_disk(f, chunks[1], app),
                Panel::Memory => draw_memory(f, chunks[1], app),
                Panel::Files => draw_files(f, chunks[1], app),
            }

            let state = if paused {
                "paused"
            } else if app.is_finished() {
                "done"
            } else {
                "playing"
            };
            let seed = match app.config().seed {
                Some(seed) => seed.to_string(),
                None => "random".to_owned(),
            };
            let status = Paragraph::new(format!("{state} | seed {seed} | {KEYS}"))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(status, chunks[2]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };

        if let DisplayEvent::Input(key) = event {
            if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') => return RunnerEvent::Quit,
                    KeyCode::Char('p') => return RunnerEvent::Pause,
                    KeyCode::Char('r') => return RunnerEvent::Resume,
                    KeyCode::Char('s') => return RunnerEvent::Step,
                    KeyCode::Char('d') => return RunnerEvent::FlipDirection,
                    KeyCode::Char('n') => return RunnerEvent::Reseed,
                    KeyCode::Tab => return RunnerEvent::NextPanel,
                    _ => {}
                };
            }
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn titled<'a, T: Into<Spans<'a>>>(title: T) -> Block<'a> {
    Block::default().title(title).borders(Borders::ALL)
}

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.to_vec()).style(bold())
}

fn draw_cpu<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let processes = &app.scenario().processes;
    let rows = processes.iter().map(|process| {
        Row::new(vec![
            Cell::from(process.pid().to_string()).style(bold()),
            Cell::from(process.name().to_owned()),
            Cell::from(process.arrival().to_string()),
            Cell::from(process.burst().to_string()),
            Cell::from(process.priority().to_string()),
        ])
    });
    let table = Table::new(rows)
        .header(header(&["PID", "Name", "Arrival", "Burst", "Priority"]))
        .widths(&[
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(8),
        ])
        .block(titled("Processes"))
        .style(Style::default().fg(Color::LightGreen))
        .column_spacing(1);
    f.render_widget(table, chunks[0]);

    let mut lines = Vec::new();
    for run in &app.simulation().cpu {
        let shown = app.step().min(run.schedule.timeline.len());
        let gantt = run.schedule.timeline[..shown]
            .iter()
            .map(|slice| slice.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Spans::from(Span::styled(run.name, bold())));
        lines.push(Spans::from(format!("  {gantt}")));
        if shown == run.schedule.timeline.len() {
            lines.push(Spans::from(format!(
                "  avg waiting {:.2}, avg turnaround {:.2}",
                run.schedule.average_waiting(),
                run.schedule.average_turnaround()
            )));
        }
    }
    let title = format!("Timeline (quantum {})", app.config().quantum);
    let gantt = Paragraph::new(lines).block(titled(title));
    f.render_widget(gantt, chunks[1]);
}

fn draw_disk<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    let queue = &app.simulation().queue;
    let rankings = &app.simulation().disk;
    let rows = rankings.iter().enumerate().map(|(rank, ranking)| {
        let sequence = &ranking.plan.sequence;
        let shown = app.step().min(sequence.len());
        let path = sequence[..shown]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        Row::new(vec![
            Cell::from((rank + 1).to_string()).style(bold()),
            Cell::from(ranking.name),
            Cell::from(ranking.plan.total_seek.to_string()),
            Cell::from(format!("{:.2}", ranking.plan.average_seek())),
            Cell::from(path),
        ])
    });

    let title = format!(
        "Head {} on {} tracks, {:?} first, requests {:?}",
        queue.head(),
        queue.disk_size(),
        app.config().direction,
        queue.requests()
    );
    let table = Table::new(rows)
        .header(header(&["#", "Policy", "Total", "Average", "Sequence"]))
        .widths(&[
            Constraint::Length(2),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Percentage(100),
        ])
        .block(titled(title))
        .style(Style::default().fg(Color::LightGreen))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn draw_memory<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    let runs = &app.simulation().memory;
    let share = Constraint::Ratio(1, runs.len().max(1) as u32);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![share; runs.len()])
        .split(area);

    for (run, chunk) in runs.iter().zip(chunks) {
        let mut lines: Vec<Spans> = run
            .table
            .partitions()
            .iter()
            .enumerate()
            .map(|(index, partition)| match partition.occupant() {
                Some(occupant) => Spans::from(Span::styled(
                    format!(
                        "[{index}] {}KB {} uses {}KB",
                        partition.size(),
                        occupant.pid,
                        occupant.size
                    ),
                    Style::default().fg(Color::LightRed),
                )),
                None => Spans::from(format!("[{index}] {}KB free", partition.size())),
            })
            .collect();

        lines.push(Spans::default());
        lines.extend(run.outcomes.iter().map(|line| Spans::from(line.as_str())));

        let stats = run.table.stats();
        lines.push(Spans::default());
        lines.push(Spans::from(format!(
            "allocated {}KB of {}KB, wasted {}KB",
            stats.allocated, stats.total, stats.internal_fragmentation
        )));

        let paragraph = Paragraph::new(lines).block(titled(run.policy.name()));
        f.render_widget(paragraph, chunk);
    }
}

fn block_span(slot: &Slot) -> Span<'static> {
    match *slot {
        Slot::Free => Span::raw(" ..  "),
        Slot::Owned { file, role, .. } => {
            let color = match role {
                BlockRole::Index => Color::LightYellow,
                BlockRole::Data => Color::LightGreen,
            };
            Span::styled(
                format!("{:<4} ", file.to_string()),
                Style::default().fg(color),
            )
        }
    }
}

fn draw_files<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    let simulator = &app.simulation().files;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GRID_WIDTH), Constraint::Min(20)])
        .split(area);

    let grid: Vec<Spans> = simulator
        .device()
        .slots()
        .chunks(BLOCKS_PER_ROW)
        .map(|row| row.iter().map(block_span).collect::<Vec<_>>())
        .map(Spans::from)
        .collect();
    let map = Paragraph::new(grid).block(titled("Blocks"));
    f.render_widget(map, chunks[0]);

    let mut lines: Vec<Spans> = simulator
        .files()
        .iter()
        .map(|file| {
            Spans::from(format!(
                "{} {} {} blocks at {}",
                file.id(),
                file.name(),
                file.size(),
                file.location()
            ))
        })
        .collect();
    let log = &app.simulation().file_log;
    lines.push(Spans::default());
    lines.extend(log.iter().map(|line| Spans::from(line.as_str())));

    let stats = simulator.stats();
    lines.push(Spans::default());
    lines.push(Spans::from(format!(
        "{}/{} blocks used ({:.1}%), {} free fragments",
        stats.used_blocks, stats.total_blocks, stats.utilization, stats.fragments
    )));

    let list = Paragraph::new(lines).block(titled("Files"));
    f.render_widget(list, chunks[1]);
}

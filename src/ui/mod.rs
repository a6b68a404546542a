use std::{
    error::Error,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    cli::Cli,
    config,
    render::framebuffer::{FrameBuffer, LightCell},
    scene::Cast,
    scheduler::{FrameStatus, Scheduler},
    surface::ResizeHub,
    types::SurfaceSize,
};

pub fn run(cli: &Cli, cast: &Cast) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, cli, cast);
    shutdown_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cli: &Cli,
    cast: &Cast,
) -> Result<(), Box<dyn Error>> {
    let hub = ResizeHub::new();
    let mut ui_state = UiState::new();
    let mut scheduler = Scheduler::new(cli.sim_config());
    let measured = Some(surface_px(viewport_inner(terminal.size()?)));
    scheduler.activate(Some(&mut ui_state.framebuf), measured, &hub);

    let started = Instant::now();
    let frame_interval = Duration::from_secs_f32(1.0 / cli.fps);
    let mut last_frame = Instant::now()
        .checked_sub(frame_interval)
        .unwrap_or_else(Instant::now);
    let mut frame_counter = 0_u32;
    let mut last_fps_sample = Instant::now();
    let mut fps = 0.0_f32;
    let mut quitting = false;

    loop {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') => {
                        quitting = true;
                        if let Some(token) = scheduler.cancel_token() {
                            token.cancel();
                        }
                    }
                    KeyCode::Tab | KeyCode::Right => {
                        ui_state.hover = cycle(ui_state.hover, cast.characters.len(), true);
                    }
                    KeyCode::BackTab | KeyCode::Left => {
                        ui_state.hover = cycle(ui_state.hover, cast.characters.len(), false);
                    }
                    KeyCode::Esc => ui_state.hover = None,
                    _ => {}
                },
                CrosstermEvent::Resize(cols, rows) => {
                    let size = surface_px(viewport_inner(Rect::new(0, 0, cols, rows)));
                    if scheduler.is_active() {
                        hub.notify(size);
                    } else if !quitting {
                        scheduler.activate(Some(&mut ui_state.framebuf), Some(size), &hub);
                    }
                }
                _ => {}
            }
        }

        if last_frame.elapsed() < frame_interval {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }
        last_frame = Instant::now();

        let hover_id = ui_state
            .hover
            .and_then(|idx| cast.characters.get(idx))
            .map(|c| c.id.as_str());
        let scene = cast.scene(hover_id);
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let status = scheduler.frame(now_ms, &scene, &mut ui_state.framebuf);
        if quitting && status == FrameStatus::Stopped {
            return Ok(());
        }

        frame_counter += 1;
        if last_fps_sample.elapsed() >= Duration::from_secs(1) {
            fps = frame_counter as f32 / last_fps_sample.elapsed().as_secs_f32();
            frame_counter = 0;
            last_fps_sample = Instant::now();
        }

        terminal.draw(|frame| {
            let chunks = layout(frame.size());
            let surface = scheduler.surface_size().unwrap_or_default();
            let header = Paragraph::new(format!(
                "particles: {} | surface: {:.0}x{:.0}px | edges: {} | fps: {:.1}",
                scheduler.particles().len(),
                surface.width,
                surface.height,
                scene.edges.len(),
                fps
            ))
            .block(Block::default().borders(Borders::ALL).title("relpulse"));
            frame.render_widget(header, chunks[0]);

            let lines = compose(&ui_state.framebuf, cast, ui_state.hover);
            let viewport = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Relationships"));
            frame.render_widget(viewport, chunks[1]);

            let hovered = ui_state
                .hover
                .and_then(|idx| cast.characters.get(idx))
                .map_or("none", |c| c.name.as_str());
            let footer = Paragraph::new(format!(
                "hover: {hovered} | Tab/→: next | Shift-Tab/←: prev | Esc: clear | q: quit"
            ))
            .block(Block::default().borders(Borders::ALL).title("Controls"));
            frame.render_widget(footer, chunks[2]);
        })?;
    }
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    framebuf: FrameBuffer,
    hover: Option<usize>,
}

impl UiState {
    fn new() -> Self {
        Self {
            framebuf: FrameBuffer::new(0, 0),
            hover: None,
        }
    }
}

fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area)
}

fn viewport_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(layout(area)[1])
}

fn surface_px(area: Rect) -> SurfaceSize {
    SurfaceSize::new(
        area.width as f32 * config::PX_PER_COL,
        area.height as f32 * config::PX_PER_ROW,
    )
}

fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(idx), true) => (idx + 1) % len,
        (Some(idx), false) => (idx + len - 1) % len,
    })
}

fn glyph_for(cell: &LightCell) -> char {
    let i = cell.intensity();
    if i < 0.04 {
        ' '
    } else if i < 0.15 {
        '·'
    } else if i < 0.3 {
        '∙'
    } else if i < 0.5 {
        '•'
    } else {
        '●'
    }
}

/// Particle light underneath, character labels on top.
fn compose(framebuf: &FrameBuffer, cast: &Cast, hover: Option<usize>) -> Vec<Line<'static>> {
    let width = framebuf.width() as usize;
    let height = framebuf.height() as usize;
    let mut grid: Vec<Vec<(char, Style)>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let cell = framebuf.get(x as u16, y as u16);
                    let (r, g, b) = cell.rgb();
                    (glyph_for(&cell), Style::default().fg(Color::Rgb(r, g, b)))
                })
                .collect()
        })
        .collect();

    if width > 0 && height > 0 {
        for (idx, ch) in cast.characters.iter().enumerate() {
            let style = if hover == Some(idx) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let row = ((ch.y / 100.0) * (height - 1) as f32).round() as usize;
            let center = ((ch.x / 100.0) * (width - 1) as f32).round() as usize;
            let label: Vec<char> = ch.name.chars().collect();
            let start = center
                .saturating_sub(label.len() / 2)
                .min(width.saturating_sub(label.len()));
            for (offset, glyph) in label.into_iter().enumerate() {
                if let Some(slot) = grid[row].get_mut(start + offset) {
                    *slot = (glyph, style);
                }
            }
        }
    }

    grid.into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, style)| Span::styled(ch.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use typewriter_core::{AppConfig, SavedState};
use typewriter_tui::{
    app::App,
    event::{AppEvent, EventHandler, RefreshResult},
    input::{handle_key_event, handle_mouse_event, pointer_event, Action},
    widgets::{ItemListWidget, RefreshIndicatorWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, restore: bool) -> Result<()> {
    let state_path = config.state_path();
    let saved = if restore {
        SavedState::load(&state_path).unwrap_or_else(|e| {
            warn!(error = %e, "could not read saved state, starting fresh");
            SavedState::default()
        })
    } else {
        SavedState::default()
    };

    let mut app = App::new(config.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Typewriter"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Size the layout before resuming so the refresh replays at its final offset
    let size = terminal.size()?;
    app.on_resize(main_layout(Rect::new(0, 0, size.width, size.height))[0]);

    // Channel for background refresh completions
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<RefreshResult>();
    let refresh_delay = Duration::from_millis(config.ui.refresh_delay_ms);

    if let Some(generation) = app.restore(saved) {
        info!("resuming refresh from previous session");
        spawn_refresh(generation, refresh_delay, refresh_tx.clone());
    }

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = main_loop(
        &mut terminal,
        &mut app,
        &event_handler,
        &mut refresh_rx,
        &refresh_tx,
        refresh_delay,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = app.layout.save_state().save(&state_path) {
        warn!(error = %e, "could not save refresh state");
    }

    result
}

/// Refresh layout on top, status bar below
fn main_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area)
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    refresh_rx: &mut mpsc::UnboundedReceiver<RefreshResult>,
    refresh_tx: &mpsc::UnboundedSender<RefreshResult>,
    refresh_delay: Duration,
) -> Result<()> {
    let mut last_frame = Instant::now();
    // Input, resizes and refresh completions force a draw
    let mut needs_draw = true;

    loop {
        // Process any completed refresh operations (non-blocking)
        while let Ok(result) = refresh_rx.try_recv() {
            match result {
                RefreshResult::Finished { generation } => app.finish_refresh(generation),
            }
            needs_draw = true;
        }

        // A drag committed to a refresh since the last iteration
        if let Some(generation) = app.take_refresh_request() {
            spawn_refresh(generation, refresh_delay, refresh_tx.clone());
            needs_draw = true;
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        let indicator_changed = app.take_redraw();
        if indicator_changed || needs_draw {
            needs_draw = false;
            terminal.draw(|frame| {
                let layout = main_layout(frame.area());
                app.on_resize(layout[0]);

                ItemListWidget::render(frame, layout[0], app);
                RefreshIndicatorWidget::render(frame, layout[0], app);
                StatusBarWidget::render(frame, layout[1], app);
            })?;
        }

        // Poll faster while the indicator or a settle is moving
        let event = if app.needs_animation() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            if !matches!(event, AppEvent::Tick) {
                needs_draw = true;
            }
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    handle_action(app, action, refresh_tx, refresh_delay);
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(&mouse, app.content_area) {
                        app.handle_pointer(pointer);
                    } else {
                        handle_action(app, handle_mouse_event(&mouse), refresh_tx, refresh_delay);
                    }
                }
                // The next draw picks up the new size
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(
    app: &mut App,
    action: Action,
    refresh_tx: &mpsc::UnboundedSender<RefreshResult>,
    refresh_delay: Duration,
) {
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::ScrollDown => app.scroll(3),
        Action::ScrollUp => app.scroll(-3),
        Action::Refresh => {
            if let Some(generation) = app.start_refresh() {
                spawn_refresh(generation, refresh_delay, refresh_tx.clone());
            }
        }
        Action::StopRefresh => app.cancel_refresh(),
        Action::ToggleEnabled => app.toggle_enabled(),
        Action::None => {}
    }
}

/// Stand-in for real work: report completion after `delay`
fn spawn_refresh(generation: u64, delay: Duration, tx: mpsc::UnboundedSender<RefreshResult>) {
    info!(generation, ?delay, "refresh task spawned");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(RefreshResult::Finished { generation });
    });
}

//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::dto::{LoadOutcome, SubmitOutcome};
use crate::application::use_cases::{GalleryLoader, RatingSubmitter};
use crate::domain::entities::IntersectionBatch;
use crate::domain::errors::GalleryError;
use crate::infrastructure::viewport::ScrollViewport;
use crate::presentation::events::EventResult;
use crate::presentation::ui::gallery_screen::{GalleryAction, GalleryScreen, GalleryScreenState};
use crate::presentation::ui::terminal_display::TerminalDisplay;
use crate::presentation::widgets::StatusBar;

#[derive(Debug)]
enum Action {
    Loaded(Result<LoadOutcome, GalleryError>),
    Rated(Result<SubmitOutcome, GalleryError>),
}

/// Terminal gallery browser.
pub struct App {
    loader: Arc<GalleryLoader>,
    submitter: Arc<RatingSubmitter>,
    display: Arc<TerminalDisplay>,
    viewport: Arc<ScrollViewport>,
    intersections: mpsc::UnboundedReceiver<IntersectionBatch>,
    screen: GalleryScreenState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

impl App {
    /// Wires the use cases to the terminal display and viewport.
    #[must_use]
    pub fn new(
        loader: Arc<GalleryLoader>,
        submitter: Arc<RatingSubmitter>,
        display: Arc<TerminalDisplay>,
        viewport: Arc<ScrollViewport>,
        intersections: mpsc::UnboundedReceiver<IntersectionBatch>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screen = GalleryScreenState::new(viewport.geometry());

        Self {
            loader,
            submitter,
            display,
            viewport,
            intersections,
            screen,
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// Starts the first load and runs until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.spawn_load();
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let display = self.display.clone();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(batch) = self.intersections.recv() => {
                    let resolved = self.loader.handle_intersections(&batch).await;
                    debug!(entries = batch.len(), resolved, "Handled intersection batch");
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                () = display.changed() => {}

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let snapshot = self.display.snapshot();
        let screen = GalleryScreen::new(&snapshot, self.viewport.offset());
        frame.render_stateful_widget(screen, frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        let snapshot = self.display.snapshot();
        match self.screen.handle_key(key, &snapshot) {
            GalleryAction::None => EventResult::Continue,
            GalleryAction::Quit => EventResult::Exit,
            GalleryAction::Reload => {
                self.spawn_load();
                EventResult::Consumed
            }
            GalleryAction::Submit(control_id) => {
                self.spawn_submit(control_id);
                EventResult::Consumed
            }
            GalleryAction::SelectionMoved => {
                let rows = snapshot.view().map_or(0, |view| view.rows.len());
                self.follow_selection(rows);
                EventResult::Consumed
            }
        }
    }

    fn follow_selection(&self, rows: usize) {
        let current = self.viewport.offset();
        let target = self.screen.follow_selection(current, rows);
        if target != current {
            self.viewport.scroll_to(target);
            self.viewport.flush();
        }
    }

    fn spawn_load(&self) {
        let loader = self.loader.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = loader.load().await;
            let _ = tx.send(Action::Loaded(result));
        });
    }

    fn spawn_submit(&self, control_id: String) {
        let submitter = self.submitter.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = submitter.submit(&control_id).await;
            let _ = tx.send(Action::Rated(result));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Loaded(Ok(outcome)) => self.on_loaded(outcome),
            Action::Loaded(Err(e)) => {
                error!(error = %e, "Gallery load failed");
                self.screen
                    .set_status(StatusBar::error(format!("Could not load images: {e}")));
            }
            Action::Rated(Ok(SubmitOutcome::Submitted { selection, reload })) => {
                info!(selection = %selection, "Rating submitted");
                self.on_loaded(reload);
                self.screen.set_status(StatusBar::success(format!(
                    "Rated {} with {} stars",
                    selection.record_id, selection.star
                )));
            }
            Action::Rated(Ok(SubmitOutcome::Ignored { selection })) => {
                debug!(selection = %selection, "Selection ignored");
                self.screen
                    .set_status(StatusBar::warning("Rating update already in progress"));
            }
            Action::Rated(Err(e)) => {
                warn!(error = %e, "Rating submission failed");
                self.screen
                    .set_status(StatusBar::error(format!("Could not save rating: {e}")));
            }
        }
    }

    fn on_loaded(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Rendered { rows, cards, .. } => {
                self.screen.clamp_selection(cards);
                self.follow_selection(rows);
                self.viewport.flush();
                self.screen
                    .set_status(StatusBar::info(format!("Loaded {cards} images")));
            }
            LoadOutcome::Superseded { cycle, latest } => {
                debug!(cycle = %cycle, latest = %latest, "Load superseded");
            }
        }
    }
}

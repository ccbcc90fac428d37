use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::SynchronizedUpdate;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::widgets::WidgetRef;
use setup_guide_command_block::ClipboardWriter;
use setup_guide_command_block::CopyAction;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::clipboard::ClipboardBackend;
use crate::clipboard::TerminalWrite;
use crate::clipboard::clipboard_for;
use crate::guide::Guide;
use crate::guide_view::GuideView;
use crate::tui;

/// Time window for debouncing redraw requests.
const REDRAW_DEBOUNCE: Duration = Duration::from_millis(10);

pub(crate) struct App {
    app_event_tx: AppEventSender,
    app_event_rx: Receiver<AppEvent>,
    guide_view: GuideView,
    clipboard: Arc<dyn ClipboardWriter>,
    runtime: tokio::runtime::Handle,

    /// True when a redraw has been scheduled but not yet executed.
    pending_redraw: Arc<AtomicBool>,
}

impl App {
    /// Must be called from within a tokio runtime; clipboard writes are
    /// spawned onto it.
    pub(crate) fn new(guide: &Guide, backend: ClipboardBackend, expand: Option<&str>) -> Self {
        let (app_event_tx, app_event_rx) = channel();
        let app_event_tx = AppEventSender::new(app_event_tx);

        let clipboard = {
            let tx = app_event_tx.clone();
            clipboard_for(
                backend,
                Arc::new(move |write| tx.send(AppEvent::TerminalWrite(write))),
            )
        };

        let mut guide_view = GuideView::new(guide, app_event_tx.clone());
        if let Some(id) = expand {
            if !guide_view.expand_section(id) {
                tracing::warn!("no section with id `{id}` to expand");
            }
        }

        // Spawn a dedicated thread for reading the crossterm event loop and
        // re-publishing the events as AppEvents, as appropriate.
        {
            let app_event_tx = app_event_tx.clone();
            thread::spawn(move || {
                loop {
                    // Poll with a timeout so the event lock is released
                    // regularly.
                    if let Ok(true) = crossterm::event::poll(Duration::from_millis(100)) {
                        match crossterm::event::read() {
                            Ok(crossterm::event::Event::Key(key_event)) => {
                                app_event_tx.send(AppEvent::KeyEvent(key_event));
                            }
                            Ok(crossterm::event::Event::Resize(_, _)) => {
                                app_event_tx.send(AppEvent::RequestRedraw);
                            }
                            Ok(_) => {}
                            Err(e) => tracing::warn!("failed to read terminal event: {e}"),
                        }
                    }
                }
            });
        }

        Self {
            app_event_tx,
            app_event_rx,
            guide_view,
            clipboard,
            runtime: tokio::runtime::Handle::current(),
            pending_redraw: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Schedule a redraw if one is not already pending.
    fn schedule_redraw(&self) {
        if self
            .pending_redraw
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let tx = self.app_event_tx.clone();
        let pending_redraw = self.pending_redraw.clone();
        thread::spawn(move || {
            thread::sleep(REDRAW_DEBOUNCE);
            tx.send(AppEvent::Redraw);
            pending_redraw.store(false, Ordering::SeqCst);
        });
    }

    pub(crate) fn run(&mut self, terminal: &mut tui::Tui) -> Result<()> {
        // Insert an event to trigger the first render.
        self.app_event_tx.send(AppEvent::RequestRedraw);

        while let Ok(event) = self.app_event_rx.recv() {
            match event {
                AppEvent::RequestRedraw => {
                    self.schedule_redraw();
                }
                AppEvent::Redraw => {
                    std::io::stdout().sync_update(|_| self.draw_next_frame(terminal))??;
                }
                AppEvent::KeyEvent(key_event) => match key_event {
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        kind: KeyEventKind::Press,
                        ..
                    } => {
                        self.app_event_tx.send(AppEvent::ExitRequest);
                    }
                    KeyEvent {
                        kind: KeyEventKind::Press | KeyEventKind::Repeat,
                        ..
                    } => {
                        self.guide_view.handle_key_event(key_event);
                    }
                    _ => {}
                },
                AppEvent::Copy(action) => {
                    self.spawn_copy(action);
                }
                AppEvent::TerminalWrite(write) => {
                    write_between_frames(terminal.backend_mut(), write);
                }
                AppEvent::ExitRequest => {
                    break;
                }
            }
        }
        Ok(())
    }

    fn spawn_copy(&self, action: CopyAction) {
        let clipboard = Arc::clone(&self.clipboard);
        self.runtime.spawn(async move {
            action.run(clipboard.as_ref()).await;
        });
    }

    fn draw_next_frame(&mut self, terminal: &mut tui::Tui) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            self.guide_view.render_ref(area, frame.buffer_mut());
        })?;
        Ok(())
    }
}

/// Write `write.sequence` to `out` and report the result to the copy that
/// queued it. Called only from the event loop, never during a draw.
fn write_between_frames<W: Write>(out: &mut W, write: TerminalWrite) {
    let result = out
        .write_all(write.sequence.as_bytes())
        .and_then(|()| out.flush());
    if let Err(e) = &result {
        tracing::warn!("failed to write to terminal: {e}");
    }
    let _ = write.done.send(result);
}

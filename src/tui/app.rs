//! Main TUI application state machine.
//!
//! Handles:
//! - Input event handling
//! - Dispatching actions to background workers
//! - Folding worker results into the session

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::adapters::{FsReportSink, HttpApi};
use crate::application::{plan, Intent, Prompt, ReadmissionService, Session};
use crate::config::Config;
use crate::domain::FormState;
use crate::Result;

use super::styles::WardTheme;
use super::ui::{form::render_form, render_disclaimer, render_prompt, result::render_results};
use super::worker::{RequestWorkers, WorkerEvent};

type Service = ReadmissionService<HttpApi, FsReportSink>;

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Executes planned calls; shared with worker threads
    service: Arc<Service>,

    /// Backend base URL, shown in the header
    api_url: String,

    form: FormState,

    session: Session,

    workers: RequestWorkers,

    /// Blocking message box, if one is up
    prompt: Option<Prompt>,
}

impl App {
    /// Create a new application instance from environment configuration.
    ///
    /// # Errors
    /// Returns `WardcastError::Config` if a `WARDCAST_*` variable is invalid
    /// and `WardcastError::Api` if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::from_config(Config::from_env()?)
    }

    /// Build the adapters described by `config` and wire them into an app.
    ///
    /// # Errors
    /// Returns `WardcastError::Api` if the HTTP client cannot be built.
    pub fn from_config(config: Config) -> Result<Self> {
        tracing::info!(
            api_url = %config.api_url,
            report_dir = %config.report_dir.display(),
            timeout_secs = config.http_timeout.map(|d| d.as_secs()),
            "Configuration loaded"
        );

        let api = Arc::new(HttpApi::new(&config.api_url, config.http_timeout)?);
        let sink = Arc::new(FsReportSink::new(config.report_dir));

        Ok(Self::with_dependencies(Arc::new(ReadmissionService::new(api, sink))))
    }

    /// Create application with an injected service (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(service: Arc<Service>) -> Self {
        let api_url = service.api().base_url().to_string();
        Self {
            should_quit: false,
            service,
            api_url,
            form: FormState::default(),
            session: Session::default(),
            workers: RequestWorkers::default(),
            prompt: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        // Buffers hold patient identity; do not leave them to the allocator.
        self.wipe_patient_data();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive while requests are in flight
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Key hints
                Constraint::Length(2), // Disclaimer
            ])
            .split(area);

        self.render_header(f, chunks[0]);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        render_form(f, content[0], &self.form);
        render_results(f, content[1], &self.session);

        self.render_footer(f, chunks[2]);
        render_disclaimer(f, chunks[3]);

        if let Some(prompt) = &self.prompt {
            render_prompt(f, area, prompt);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(" WARDCAST ", WardTheme::title()),
            Span::styled("│ Readmission Risk Console", WardTheme::text_secondary()),
            Span::raw("   "),
            Span::styled(self.api_url.as_str(), WardTheme::text_muted()),
        ]))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(WardTheme::border()),
        );

        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (key, desc) in [
            ("Enter", "Predict"),
            ("^S", "Simulate"),
            ("^R", "Report"),
            ("←/→", "Choice"),
            ("^L", "Sample"),
            ("^N", "Reset"),
            ("^Q", "Quit"),
        ] {
            spans.push(Span::styled(format!(" {key} "), WardTheme::key_hint()));
            spans.push(Span::styled(format!(" {desc} "), WardTheme::key_desc()));
        }

        let pending = self.workers.in_flight();
        if pending > 0 {
            spans.push(Span::styled(
                format!("  ⏳ {pending} request(s) in flight"),
                WardTheme::warning(),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Apply every finished request, in arrival order.
    fn poll_workers(&mut self) {
        while let Some(event) = self.workers.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: WorkerEvent) {
        match event.result {
            Ok(outcome) => {
                tracing::info!(seq = event.seq, action = %event.intent, "Request completed");
                if let Some(prompt) = self.session.apply(outcome) {
                    self.prompt = Some(prompt);
                }
            }
            Err(e) => {
                tracing::warn!(seq = event.seq, action = %event.intent, "Request failed");
                self.prompt = Some(Prompt::from(&e));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Windows terminals also report releases.
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global quit handling
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        // A prompt blocks everything else until acknowledged.
        if self.prompt.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.prompt = None;
            }
            return;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('s') => self.dispatch(Intent::Simulate),
                KeyCode::Char('r') => self.dispatch(Intent::Report),
                KeyCode::Char('l') => self.form.load_sample_data(),
                KeyCode::Char('n') => self.form.clear_sensitive(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.dispatch(Intent::Predict),
            KeyCode::Down | KeyCode::Tab => self.form.next_field(),
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Right => self.form.cycle_choice(true),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            KeyCode::Char(c) => self.form.input_char(c),
            _ => {}
        }
    }

    fn wipe_patient_data(&mut self) {
        self.form.clear_sensitive();
        self.session.clear_sensitive();
    }

    /// Plan the action on the UI thread and hand the call to a worker.
    fn dispatch(&mut self, intent: Intent) {
        match plan(intent, &self.form, self.session.last_payload()) {
            Ok(planned) => {
                let call = self.session.begin(planned);
                let seq = self.workers.spawn(Arc::clone(&self.service), call);
                tracing::debug!(seq, action = %intent, "Action dispatched");
            }
            Err(e) => {
                tracing::debug!(action = %intent, error = %e, "Action refused");
                self.prompt = Some(Prompt::from(&e));
            }
        }
    }
}

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::api::CatalogClient;
use crate::config::AppConfig;
use crate::events::EventHandler;
use crate::tea::message::SystemMessage;
use crate::tea::{update, CommandExecutor, Message, Model};

/// Interactive admin panel: owns the model and drives the TEA loop
pub struct App {
    model: Model,
    event_handler: EventHandler,
    executor: CommandExecutor,
    messages: mpsc::UnboundedReceiver<Message>,
}

impl App {
    pub fn new(config: &AppConfig, client: Arc<dyn CatalogClient>) -> Self {
        let (sender, messages) = mpsc::unbounded_channel();
        Self {
            model: Model::new(config),
            event_handler: EventHandler::new(),
            executor: CommandExecutor::new(sender, client),
            messages,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Run one message through `update` and hand its commands to the executor
    pub fn dispatch(&mut self, message: Message) {
        let model = std::mem::take(&mut self.model);
        let result = update(model, message);
        self.model = result.model;
        for command in result.commands {
            self.executor.execute(command);
        }
    }

    /// Apply every message the executor has delivered so far
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.messages.try_recv() {
            self.dispatch(message);
        }
    }

    /// Wait for the next executor message and apply it
    pub async fn process_next_message(&mut self) -> bool {
        match self.messages.recv().await {
            Some(message) => {
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Check if we're running in a proper terminal
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "shopdesk requires a terminal (TTY) for the interactive panel. Use a subcommand such as `shopdesk list` for scripting."
            ));
        }

        // Setup terminal
        enable_raw_mode()
            .map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        // Run the main loop
        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(50);

        if let Ok(size) = terminal.size() {
            self.dispatch(SystemMessage::Resize(size.width, size.height).into());
        }
        self.dispatch(SystemMessage::StartAutoRefresh.into());

        loop {
            // Results from network and export tasks
            self.drain_messages();

            // Draw UI
            terminal.draw(|f| crate::ui::render(f, &self.model))?;

            // Handle events
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(message) = self.event_handler.handle_key_event(&key, &self.model) {
                            self.dispatch(message);
                        }
                    }
                    Event::Resize(width, height) => {
                        self.dispatch(SystemMessage::Resize(width, height).into());
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.dispatch(SystemMessage::Tick.into());
                last_tick = Instant::now();
            }

            if self.model.app_state.should_quit {
                break;
            }
        }

        self.dispatch(SystemMessage::StopAutoRefresh.into());
        tracing::info!("Admin panel closed");
        Ok(())
    }
}

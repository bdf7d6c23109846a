mod sort;
mod view;

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use crate::datasources::Aggregator;
use crate::metrics::TokenMetrics;
use crate::tokens::TokenConfig;

pub use sort::{SortColumn, SortPreference};
pub use view::{render, ViewState};

pub const REFRESH_PERIOD: Duration = Duration::from_secs(10 * 60);

type BatchResult = Result<Vec<TokenMetrics>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sort(SortColumn),
    Refresh,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "refresh" => Some(Command::Refresh),
            "q" | "quit" => Some(Command::Quit),
            other => SortColumn::from_command(other).map(Command::Sort),
        }
    }
}

/// Periodic refresh timer. Lives exactly as long as the view; the first tick
/// completes immediately.
struct RefreshSchedule {
    interval: Interval,
}

impl RefreshSchedule {
    fn start(period: Duration) -> RefreshSchedule {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Refresh schedule started, period {:?}", period);
        RefreshSchedule { interval }
    }

    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Drop for RefreshSchedule {
    fn drop(&mut self) {
        info!("Refresh schedule stopped");
    }
}

pub struct Dashboard {
    aggregator: Arc<Aggregator>,
    tokens: &'static [TokenConfig],
    state: ViewState,
    sort: SortPreference,
    in_flight: bool,
}

impl Dashboard {
    pub fn new(aggregator: Arc<Aggregator>, tokens: &'static [TokenConfig]) -> Dashboard {
        Dashboard {
            aggregator,
            tokens,
            state: ViewState::Loading,
            sort: SortPreference::default(),
            in_flight: false,
        }
    }

    pub fn render(&self) -> String {
        render(&self.state, &self.sort)
    }

    /// Runs until `q`, end of input or Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(BufReader::new(tokio::io::stdin()), tokio::signal::ctrl_c())
            .await
    }

    async fn run_until<R, S>(mut self, input: R, shutdown: S) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        S: Future,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut schedule = RefreshSchedule::start(REFRESH_PERIOD);
        let mut lines = input.lines();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = schedule.tick() => {
                    if self.begin_refresh(&tx) {
                        self.draw()?;
                    }
                }
                Some(res) = rx.recv() => {
                    self.finish_refresh(res);
                    self.draw()?;
                }
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break,
                    };
                    match Command::parse(&line) {
                        Some(Command::Quit) => break,
                        Some(cmd) => {
                            if self.handle_command(cmd, &tx) {
                                self.draw()?;
                            }
                        }
                        None => debug!("Ignoring input {:?}", line),
                    }
                }
                _ = &mut shutdown => break,
            }
        }
        info!("Dashboard closed");
        Ok(())
    }

    /// Returns whether the view changed.
    fn handle_command(&mut self, cmd: Command, tx: &mpsc::UnboundedSender<BatchResult>) -> bool {
        match cmd {
            Command::Sort(column) => {
                self.sort.activate(column);
                true
            }
            Command::Refresh => self.begin_refresh(tx),
            Command::Quit => false,
        }
    }

    /// Kicks off a batch unless one is already running.
    fn begin_refresh(&mut self, tx: &mpsc::UnboundedSender<BatchResult>) -> bool {
        if self.in_flight {
            debug!("Refresh already in flight, skipping");
            return false;
        }
        self.in_flight = true;
        self.state = ViewState::Loading;

        let aggregator = self.aggregator.clone();
        let tokens = self.tokens;
        let tx = tx.clone();
        tokio::spawn(async move {
            let batch = tokio::spawn(async move { aggregator.fetch_all(tokens).await });
            let res = batch
                .await
                .map_err(|e| anyhow!("Refresh batch failed: {}", e));
            if tx.send(res).is_err() {
                debug!("Dashboard gone, dropping refresh result");
            }
        });
        true
    }

    fn finish_refresh(&mut self, res: BatchResult) {
        self.in_flight = false;
        self.state = match res {
            Ok(rows) => {
                info!("Refreshed {} tokens", rows.len());
                ViewState::Ready(rows)
            }
            Err(e) => {
                error!("{:#}", e);
                ViewState::Failed
            }
        };
    }

    fn draw(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write!(out, "\x1b[2J\x1b[H{}", self.render())?;
        out.flush()?;
        Ok(())
    }
}

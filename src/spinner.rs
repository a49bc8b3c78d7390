//! Progress line for the upload client while it waits on the backend.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

const TICKS: [char; 4] = ['|', '/', '-', '\\'];
const TICK_EVERY: Duration = Duration::from_millis(120);

/// Renders `<tick> <message> (<elapsed>s)` on stderr until stopped.
pub struct Spinner {
    ticker: JoinHandle<()>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let message = message.to_owned();
        let started = Instant::now();

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_EVERY);
            let mut tick = 0usize;
            loop {
                interval.tick().await;
                let line = status_line(&message, tick, started.elapsed());
                let mut stderr = std::io::stderr().lock();
                let _ = write!(stderr, "\r{line}");
                let _ = stderr.flush();
                tick = tick.wrapping_add(1);
            }
        });

        Self { ticker }
    }

    /// Halts the ticker and blanks the line it was drawing on.
    pub async fn stop(self) {
        self.ticker.abort();
        let _ = self.ticker.await;

        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r\x1b[K");
        let _ = stderr.flush();
    }
}

fn status_line(message: &str, tick: usize, elapsed: Duration) -> String {
    format!(
        "{} {message} ({}s)",
        TICKS[tick % TICKS.len()],
        elapsed.as_secs()
    )
}

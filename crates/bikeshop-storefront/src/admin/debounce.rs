//! Trailing-edge debounce for search boxes.
//!
//! Keystrokes go into a [`SearchInput`]; the paired [`Debouncer`] yields a
//! value only once no newer keystroke has arrived for the configured delay.
//! A keystroke during the wait restarts it, so earlier terms are never
//! fetched.

use std::time::Duration;

use tokio::sync::watch;

/// Sending half: one call per keystroke.
#[derive(Debug)]
pub struct SearchInput<T> {
    tx: watch::Sender<T>,
}

impl<T> SearchInput<T> {
    pub fn send(&self, value: T) {
        self.tx.send_replace(value);
    }
}

#[derive(Debug)]
pub struct Debouncer<T> {
    rx: watch::Receiver<T>,
    delay: Duration,
}

/// Creates a connected input/debouncer pair seeded with `initial`. The
/// initial value is never yielded.
#[must_use]
pub fn debounced<T>(initial: T, delay: Duration) -> (SearchInput<T>, Debouncer<T>) {
    let (tx, rx) = watch::channel(initial);
    (SearchInput { tx }, Debouncer { rx, delay })
}

impl<T: Clone> Debouncer<T> {
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next settled value. Returns `None` once the input is
    /// dropped and every value has been yielded.
    pub async fn settled(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        loop {
            match tokio::time::timeout(self.delay, self.rx.changed()).await {
                // Newer keystroke: restart the wait.
                Ok(Ok(())) => {}
                Ok(Err(_)) | Err(_) => break,
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }
}

//! Line-based zone activations.

use platform::{InputDevice, InputEvent, ZoneId};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

/// Each non-empty line read from the source activates the zone it names.
pub struct StdinInput<R = Stdin> {
    lines: Lines<BufReader<R>>,
}

impl StdinInput<Stdin> {
    /// Read activations from standard input.
    pub fn new() -> Self {
        Self::from_reader(tokio::io::stdin())
    }
}

impl Default for StdinInput<Stdin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncRead + Unpin> StdinInput<R> {
    /// Read activations from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<R: AsyncRead + Unpin + Send + 'static> InputDevice for StdinInput<R> {
    async fn wait_for_event(&mut self) -> Option<InputEvent> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let id = line.trim();
                    if !id.is_empty() {
                        return Some(InputEvent::Activate(ZoneId::from(id)));
                    }
                }
                Ok(None) => return None,
                Err(err) => {
                    tracing::warn!(error = %err, "input read failed, closing input");
                    return None;
                }
            }
        }
    }
}

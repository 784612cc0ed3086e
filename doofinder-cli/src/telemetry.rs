use std::io::{self, Write};

use indicatif::ProgressBar;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Logs go to stderr so stdout carries only tool output. `RUST_LOG` selects
/// the filter (default `info`) and `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    init_with_writer(io::stderr);
}

/// Like [`init_tracing`], but each log line hides `progress` while it is
/// written so the bar redraws cleanly below it.
pub fn init_tracing_with_progress(progress: &ProgressBar) {
    init_with_writer(ProgressLogWriter {
        progress: progress.clone(),
    });
}

fn init_with_writer<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[derive(Clone)]
struct ProgressLogWriter {
    progress: ProgressBar,
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = SuspendingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter {
            progress: self.progress.clone(),
            inner: io::stderr(),
        }
    }
}

/// Writes through `inner` with the progress bar cleared.
pub struct SuspendingWriter<W> {
    progress: ProgressBar,
    inner: W,
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

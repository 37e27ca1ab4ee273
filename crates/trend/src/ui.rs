use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.blue} {msg} [{elapsed}]") {
        Ok(style) => pb.set_style(style),
        Err(e) => log::debug!("falling back to the default spinner: {e}"),
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spin while `fut` runs; the spinner is cleared before the result is printed.
pub async fn with_spinner<F: Future>(msg: &str, fut: F) -> F::Output {
    let pb = spinner(msg);
    let out = fut.await;
    pb.finish_and_clear();
    out
}


use indicatif::{ProgressState, ProgressStyle};

/// Template for every progress bar we draw
const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}); ETA: {eta_precise}; {msg}";

/// Shared function to pull our progress bar styling
pub fn get_progress_style() -> ProgressStyle {
    let style = match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(style) => style,
        Err(_e) => ProgressStyle::default_bar()
    };
    style
        .with_key("percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}%", state.fraction() * 100.0);
        })
        .progress_chars("##-")
}

use clap::Parser;

use term_desk::config::{DeskCli, DeskConfig};
use term_desk::desktop::{Desktop, DesktopOptions};
use term_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_desk::error::DeskResult;
use term_desk::log_buffer::{LogHandle, set_global_log};
use term_desk::runner::run_desktop;
use term_desk::tracing_sub::{self, LogSink};

fn main() -> DeskResult<()> {
    let cli = DeskCli::parse();
    let config = DeskConfig::try_from(&cli)?;

    let log = LogHandle::default();
    let sink = match &config.log_file {
        Some(path) => LogSink::file(path)?,
        None => {
            set_global_log(log.clone());
            LogSink::from_global()
        }
    };
    tracing_sub::init(sink, config.log_level);

    let mut desktop = Desktop::new(DesktopOptions::from(&config))?.with_log(log);
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let size = output.terminal_mut().size()?;
    desktop.resize(ratatui::layout::Rect::new(0, 0, size.width, size.height));
    let now = std::time::Instant::now();
    for app in &config.open {
        desktop.launch(*app, now);
    }
    tracing::info!(apps = config.open.len(), "desktop ready");

    let result = run_desktop(
        output.terminal_mut(),
        ConsoleInputDriver::new(),
        &mut desktop,
        config.frame_interval,
    );
    output.exit()?;
    result?;
    Ok(())
}

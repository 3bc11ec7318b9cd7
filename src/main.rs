//! Wear monitor entrypoint: one interactive session over stdin.
//! Each input line is a JSON form submission; each output line is a diagnosis
//! or an error. The recent report table is printed when input ends.

use std::io::{BufRead, Write};
use tracing::{info, warn};
use wear_monitor::{
    config::MonitorConfig,
    logging::{ErrorLine, StructuredLogger},
    model::load_model,
    session::DiagnosisSession,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("WEAR_MONITOR_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = MonitorConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);
    config.validate()?;

    info!(model = ?config.model.path, kind = ?config.model.kind, "wear monitor starting");
    let model = load_model(&config.model)?;
    let mut session = DiagnosisSession::new(model.as_ref(), config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in stdin.lock().split(b'\n').enumerate() {
        let line = line?;
        match session.submit_line(&line) {
            None => continue,
            Some(Ok(diagnosis)) => StructuredLogger::emit_json(&diagnosis, &mut out)?,
            Some(Err(e)) => {
                warn!(line = line_no + 1, kind = e.kind(), error = %e, "diagnosis failed");
                StructuredLogger::emit_json(
                    &ErrorLine {
                        error: e.kind(),
                        message: e.to_string(),
                    },
                    &mut out,
                )?;
            }
        }
        out.flush()?;
    }

    StructuredLogger::emit_json(&session.recent_reports(), &mut out)?;
    info!(records = session.ledger().len(), "wear monitor session ended");
    Ok(())
}

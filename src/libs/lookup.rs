use std::env;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use alloy::primitives::Address;

pub fn save_log_to_file(log: &str) {
    if !file_logs_enabled() {
        return;
    }
    if let Err(e) = save_log_in(Path::new("logs"), log) {
        eprintln!("save_log_to_file error: {e}");
    }
}

/// Append a timestamped line to the hourly log file under `dir`.
pub fn save_log_in(dir: &Path, log: &str) -> io::Result<PathBuf> {
    create_dir_all(dir)?;
    let now = chrono::Utc::now();
    let path = dir.join(format!("logs_{}.txt", now.format("%H-%d-%m-%Y")));
    let line = format!("[{}] {log}", now.format("%H:%M:%S%.3f"));
    append_line(&path, &line)?;
    Ok(path)
}

// on unless explicitly switched off: failed operations point the user here
fn file_logs_enabled() -> bool {
    match env::var("DEBUG_LOGS") {
        Ok(val) => !val.eq_ignore_ascii_case("false"),
        Err(_) => true,
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// `0x1234…abcd`
pub fn short_addr(addr: &Address) -> String {
    let s = addr.to_checksum(None);
    format!("{}…{}", &s[..6], &s[s.len() - 4..])
}

/// Plain-text log file output
///
/// Lines are appended without ANSI codes. The writer is buffered and flushed
/// explicitly on shutdown, or whenever an ERROR line is written.
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Failed to create log directory '{}': {}", parent.display(), e);
                return;
            }
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            *LOG_FILE.lock() = Some(BufWriter::new(file));
        }
        Err(e) => eprintln!("Failed to open log file '{}': {}", path, e),
    }
}

pub fn write_to_file(line: &str, force_flush: bool) {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        if writeln!(writer, "{}", line).is_err() {
            return;
        }
        if force_flush {
            let _ = writer.flush();
        }
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = LOG_FILE.lock().as_mut() {
        let _ = writer.flush();
    }
}

//! Text formatting for the status bar.

use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

/// Formats a count with thousands separators (`1234567` becomes `1,234,567`).
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Formats a pixel extent, rounding to whole pixels.
pub fn format_pixels(pixels: f64) -> String {
    format!("{} px", format_count(pixels.max(0.0).round() as usize))
}

/// Current process memory usage in megabytes, or 0.0 if unavailable.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory()));
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    sys.process(Pid::from_u32(std::process::id()))
        .map(|process| process.memory() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}

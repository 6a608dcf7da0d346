//! Small UI helpers: human-readable sizes and uptimes.

/// SI byte sizes: `9 B`, `1.5 kB`, `83 MB`. One decimal below 10 units.
pub fn human_bytes(b: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
    if b < 10 {
        return format!("{b} B");
    }
    let mut v = b as f64;
    let mut e = 0;
    while v >= 1000.0 && e < UNITS.len() - 1 {
        v /= 1000.0;
        e += 1;
    }
    let val = (v * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{val:.1} {}", UNITS[e])
    } else {
        format!("{val:.0} {}", UNITS[e])
    }
}

pub fn format_uptime(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 3600 {
        return format!("{}m {}s", seconds / 60, seconds % 60);
    }
    if seconds < 86400 {
        return format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60);
    }
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

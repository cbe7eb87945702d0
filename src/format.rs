//! Display formatting for the rendered views. Pure functions, all of them.

use chrono::{DateTime, Utc};
use std::net::IpAddr;

const BYTE_UNITS: [&'static str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable byte magnitude, base 1024. Whole bytes stay integral, every
/// larger unit gets two decimals: 1023 -> "1023 B", 1024 -> "1.00 KB".
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return String::from("0 B");
    }
    let mut exponent = 0usize;
    let mut remaining = bytes;
    while remaining >= 1024 && exponent < BYTE_UNITS.len() - 1 {
        remaining /= 1024;
        exponent += 1;
    }
    if exponent == 0 {
        format!("{} B", bytes)
    } else {
        let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
        format!("{:.2} {}", scaled, BYTE_UNITS[exponent])
    }
}

pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// "Jan 31, 2026 14:30:45"
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M:%S").to_string()
}

/// Time-of-day only, "14:30:45"
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Thousands-separated integer, "125,432"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fraction in [0, 1] to a percentage string.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn format_protocol(protocol: &str) -> String {
    protocol.to_uppercase()
}

/// "192.168.1.1:80"; port zero means no port was observed and is omitted.
pub fn format_ip_port(ip: &IpAddr, port: u16) -> String {
    if port == 0 {
        ip.to_string()
    } else {
        format!("{}:{}", ip, port)
    }
}

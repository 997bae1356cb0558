/// Format node uptime as `<d>d, HH:MM:SS`
///
/// Negative input (clock skew on the node side) renders as `00:00:00:00`.
pub fn format_uptime(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return "00:00:00:00".to_string();
    }

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d, {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// True for a 64-character hex string (block or transaction hash)
pub fn is_hex_hash(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit())
}

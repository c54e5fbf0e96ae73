/// formats seconds as `HH:MM:SS`. hours are not wrapped at 24.
pub fn format_hms(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// formats seconds as `HH:MM`, dropping seconds. hours are not wrapped at 24.
pub fn format_hm(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

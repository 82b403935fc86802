use crate::core::RankedVideo;

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// `1234567` → `1,234,567`
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_ratio(video: &RankedVideo) -> String {
    let ratio = video.like_ratio();
    if ratio.is_infinite() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", ratio * 100.0)
    }
}

/// Cut a title to `max` characters, marking the cut with an ellipsis.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

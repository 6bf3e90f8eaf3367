/// Display urgency of an application deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineUrgency {
    /// A week or more left
    Neutral,
    /// 4-6 days left
    Warning,
    /// 1-3 days left
    Urgent,
    /// Deadline passed (or passes today)
    Expired,
}

impl DeadlineUrgency {
    /// Expired deadlines get the urgent display treatment too
    pub fn is_urgent(self) -> bool {
        matches!(self, DeadlineUrgency::Urgent | DeadlineUrgency::Expired)
    }
}

/// Classify the number of days left on a deadline. Total over all
/// integers, including negative ones.
pub fn classify_deadline(days_left: i64) -> DeadlineUrgency {
    match days_left {
        d if d >= 7 => DeadlineUrgency::Neutral,
        4..=6 => DeadlineUrgency::Warning,
        1..=3 => DeadlineUrgency::Urgent,
        _ => DeadlineUrgency::Expired,
    }
}

/// Parse the number of days out of a deadline display string like
/// "5 dagar kvar". Returns `None` when no leading integer is present.
pub fn deadline_days(deadline: &str) -> Option<i64> {
    let trimmed = deadline.trim();
    let end = trimmed
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    trimmed[..end].parse().ok()
}

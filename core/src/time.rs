use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::model::date::WIRE_FORMAT;

/// Parses a hand-typed due date relative to `today`.
///
/// Accepts `today`/`tod`, `tomorrow`/`tom`, `eow` (coming Sunday), `eom`,
/// `+3d`/`+2w`/`+1m`, weekday names with an optional count (`fri`, `2:fri`)
/// and plain `YYYY-MM-DD`.
pub fn parse_due_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return add_days(today, 1),
        "eow" => {
            let days_to_sunday = 6 - today.weekday().num_days_from_monday() as u64;
            return add_days(today, days_to_sunday);
        }
        "eom" => {
            return today
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .and_then(|next_first| next_first.pred_opt())
                .ok_or_else(|| anyhow!("Date out of range"));
        }
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        let (num_str, unit) = match rest.char_indices().last() {
            Some((idx, _)) if idx > 0 => rest.split_at(idx),
            _ => return Err(anyhow!("Invalid relative format: {}", input)),
        };
        let count: u32 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;

        return match unit {
            "d" => add_days(today, count as u64),
            "w" => add_days(today, count as u64 * 7),
            // chrono clamps to the last day of a shorter month (Jan 31 + 1m -> Feb 28)
            "m" => today
                .checked_add_months(Months::new(count))
                .ok_or_else(|| anyhow!("Date out of range")),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    // 3. Plain date
    if let Ok(date) = NaiveDate::parse_from_str(input, WIRE_FORMAT) {
        return Ok(date);
    }

    // 4. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            let mut days_needed = target.num_days_from_monday() as i64
                - today.weekday().num_days_from_monday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            // 1:fri is the next Friday, 2:fri the one after.
            let total = (count.max(1) - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed as u64))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return add_days(today, total);
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| anyhow!("Date out of range"))
}

fn parse_weekday_token(input: &str) -> Option<(u64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<u64>().ok().map(|c| (c, day)),
        // Just "fri" means 1:fri
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}

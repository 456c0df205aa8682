//! Date-derived values and the deterministic daily pick.

use crate::rules::tables::{HEADLINES, WORDLE_WORDS};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MOON_PHASES: [&str; 8] = ["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"];

/// Mean length of a synodic month, in days.
const SYNODIC_MONTH: f64 = 29.530588853;

fn reference_new_moon() -> NaiveDateTime {
    // 2001-01-24 13:00 UTC; always representable.
    NaiveDate::from_ymd_opt(2001, 1, 24).and_then(|d| d.and_hms_opt(13, 0, 0)).unwrap_or_default()
}

/// Index into [`MOON_PHASES`] for `date`, taken at 00:00 of that date.
pub fn moon_phase_index(date: NaiveDate) -> usize {
    let days = (date.and_time(NaiveTime::default()) - reference_new_moon()).num_seconds() as f64 / 86_400.0;
    let age = days.rem_euclid(SYNODIC_MONTH);
    ((age / (SYNODIC_MONTH / 8.0)).floor() as usize) % 8
}

pub fn moon_phase_emoji(date: NaiveDate) -> &'static str {
    MOON_PHASES[moon_phase_index(date)]
}

pub fn current_hour(now: NaiveDateTime) -> u32 {
    now.hour()
}

/// English weekday name, e.g. `"Tuesday"`.
pub fn weekday_name(now: NaiveDateTime) -> String {
    now.format("%A").to_string()
}

pub fn current_year(now: NaiveDateTime) -> i32 {
    now.year()
}

/// Wall-clock time as `HH:MM`, 24-hour, zero-padded.
pub fn clock_time(now: NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// `"<Month>-<DD>-<YYYY>"` reversed character by character.
pub fn reversed_date(now: NaiveDateTime) -> String {
    now.format("%B-%d-%Y").to_string().chars().rev().collect()
}

/// Fold over `"Y-M-D"` (no zero padding): `hash = (hash * 31 + byte) % 1_000_000`.
/// The same calendar day always hashes the same.
pub fn daily_hash(date: NaiveDate) -> u64 {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
        .bytes()
        .fold(0u64, |hash, b| (hash * 31 + b as u64) % 1_000_000)
}

/// Five-letter word of the day, lower-cased.
pub fn word_of_day(date: NaiveDate) -> String {
    let idx = (daily_hash(date) % WORDLE_WORDS.len() as u64) as usize;
    WORDLE_WORDS[idx].to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub headline: &'static str,
    pub first_letters: String,
}

pub fn headline_of_day(date: NaiveDate) -> Headline {
    let idx = (daily_hash(date) % HEADLINES.len() as u64) as usize;
    let headline = HEADLINES[idx];
    Headline { headline, first_letters: super::first_letters_of_words(headline) }
}

//! The progression state machine.
//!
//! ```text
//!            first edit              Win fires
//!   Idle ───────────────▶ Playing ─────────────▶ Won
//!                            ▲                    │
//!                            └──── reset() ◀──────┘
//! ```
//!
//! `active_count` starts at 1 and only grows, one rule at a time, until
//! `reset`. Delayed transitions are re-validated when they fire:
//!
//! - stale generation (a reset happened since scheduling): dropped;
//! - reveal whose `expected_active` no longer matches: dropped, so several
//!   passing edits inside one delay window reveal a single rule;
//! - win while not every rule passes any more: dropped until the next passing
//!   edit schedules it again.

use super::evaluate::evaluate_active;
use super::schedule::{Pending, Schedule, Transition};
use crate::api::{Clock, Context, Evaluation, SystemClock, catalogue};
use crate::config::Options;
use crate::error::GameError;
use crate::rules::catalogue::Catalogue;
use crate::rules::helpers::character_count;
use crate::{Rule, RuleId};
use chrono::{NaiveDateTime, TimeDelta};
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh session, no password edit yet.
    Idle,
    Playing,
    Won,
}

/// Result of [`Session::insert_example`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Cursor position (in characters) right after the inserted example.
    pub cursor: usize,
    pub evaluation: Evaluation,
}

/// One play-through.
///
/// Drivers call [`on_password_change`](Session::on_password_change) on every
/// edit, [`on_periodic_tick`](Session::on_periodic_tick) every
/// [`tick_interval`](Session::tick_interval), and [`poll`](Session::poll)
/// whenever [`next_deadline`](Session::next_deadline) has passed.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    catalogue: &'static Catalogue,
    clock: C,
    options: Options,
    password: String,
    active_count: usize,
    phase: Phase,
    generation: u64,
    schedule: Schedule,
}

impl Session<SystemClock> {
    /// Session over the standard catalogue, on the local clock.
    pub fn new(options: Options) -> Self {
        Self::with_clock(SystemClock, options)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(clock: C, options: Options) -> Self {
        Self::with_catalogue(catalogue(), clock, options)
    }

    pub fn with_catalogue(catalogue: &'static Catalogue, clock: C, options: Options) -> Self {
        Self {
            catalogue,
            clock,
            options,
            password: String::new(),
            active_count: initial_active(catalogue),
            phase: Phase::Idle,
            generation: 0,
            schedule: Schedule::default(),
        }
    }

    // --- Accessors -----------------------------------------------------------

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    pub fn catalogue(&self) -> &'static Catalogue {
        self.catalogue
    }

    /// The rules currently enforced, in id order.
    pub fn active_rules(&self) -> &'static [Rule] {
        &self.catalogue.rules()[..self.active_count]
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tick_interval(&self) -> Duration {
        self.options.tick_interval
    }

    /// Earliest pending reveal/win deadline, if any.
    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.schedule.next_deadline()
    }

    pub fn pending_transitions(&self) -> usize {
        self.schedule.len()
    }

    pub fn win_pending(&self) -> bool {
        self.schedule.has_win(self.generation)
    }

    // --- Transitions ---------------------------------------------------------

    /// Evaluate the active rules against the current password, now.
    pub fn evaluate(&self) -> Evaluation {
        self.evaluate_at(&self.clock.context())
    }

    fn evaluate_at(&self, ctx: &Context) -> Evaluation {
        let mut evaluation = evaluate_active(self.catalogue, self.active_count, &self.password, ctx);
        evaluation.won = self.is_won();
        evaluation
    }

    /// Store `password`, re-evaluate every active rule, and schedule the next
    /// reveal (or the win) when they all hold.
    pub fn on_password_change(&mut self, password: impl Into<String>) -> Evaluation {
        self.password = password.into();
        if self.phase == Phase::Idle {
            self.phase = Phase::Playing;
        }

        let ctx = self.clock.context();
        let evaluation = self.evaluate_at(&ctx);

        if evaluation.all_passed() && !self.is_won() {
            if self.active_count < self.catalogue.len() {
                let pending = Pending::Reveal { expected_active: self.active_count };
                let due = deadline(ctx.now, self.options.reveal_delay);
                if self.schedule.push(pending, due, self.generation) {
                    debug!(active = self.active_count, %due, "reveal scheduled");
                }
            } else {
                let due = deadline(ctx.now, self.options.win_delay);
                if self.schedule.push(Pending::Win, due, self.generation) {
                    debug!(%due, "win scheduled");
                }
            }
        }

        evaluation
    }

    /// Periodic refresh: recompute dynamic descriptions and re-check every
    /// active rule against the unchanged password. `None` once won.
    ///
    /// Never schedules a reveal; progression only moves on edits.
    pub fn on_periodic_tick(&mut self) -> Option<Evaluation> {
        if self.is_won() {
            return None;
        }

        let ctx = self.clock.context();
        for rule in self.active_rules().iter().filter(|r| r.is_dynamic()) {
            debug!(rule = rule.id, description = %rule.description.render(&ctx), "dynamic rule refreshed");
        }

        Some(self.evaluate_at(&ctx))
    }

    /// Fire every scheduled transition that has come due.
    pub fn poll(&mut self) -> Vec<Transition> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        for entry in self.schedule.take_due(now) {
            if entry.generation != self.generation {
                debug!(pending = ?entry.pending, "dropping transition scheduled before reset");
                continue;
            }

            match entry.pending {
                Pending::Reveal { expected_active } => {
                    if self.is_won() || self.active_count != expected_active {
                        debug!(expected_active, active = self.active_count, "stale reveal dropped");
                        continue;
                    }
                    if let Some(id) = self.add_next_rule() {
                        fired.push(Transition::RuleRevealed(id));
                    }
                }
                Pending::Win => {
                    if self.is_won() || self.active_count != self.catalogue.len() {
                        continue;
                    }
                    if !self.evaluate_at(&Context { now }).all_passed() {
                        debug!("win withdrawn; a rule stopped passing before it was due");
                        continue;
                    }
                    self.phase = Phase::Won;
                    info!(rules = self.active_count, "game won");
                    fired.push(Transition::Won);
                }
            }
        }

        fired
    }

    /// Activate the next rule in catalogue order. No-op once every rule is active.
    pub fn add_next_rule(&mut self) -> Option<RuleId> {
        let rule = self.catalogue.rules().get(self.active_count)?;
        self.active_count += 1;
        info!(rule = rule.id, active = self.active_count, "rule revealed");
        Some(rule.id)
    }

    /// Back to the first rule with an empty password. Anything still scheduled
    /// is discarded.
    pub fn reset(&mut self) {
        self.password.clear();
        self.active_count = initial_active(self.catalogue);
        self.phase = Phase::Playing;
        self.schedule.clear();
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation, "session reset");
    }

    /// Replace `selection` of the password with example `index` of rule
    /// `rule_id`, then treat it as a normal edit. Selection bounds and the
    /// returned cursor are UTF-16 offsets, the same unit as the password
    /// length; a bound that splits a surrogate pair is rejected.
    pub fn insert_example(
        &mut self,
        rule_id: RuleId,
        index: usize,
        selection: Range<usize>,
    ) -> Result<InsertOutcome, GameError> {
        let rule = self.catalogue.get(rule_id).ok_or(GameError::UnknownRule(rule_id))?;
        if rule_id as usize > self.active_count {
            return Err(GameError::InactiveRule(rule_id));
        }
        let example = rule.examples.get(index).ok_or(GameError::NoSuchExample { rule: rule_id, index })?;

        let len = character_count(&self.password);
        let invalid = GameError::InvalidSelection { start: selection.start, end: selection.end, len };
        if selection.start > selection.end {
            return Err(invalid);
        }
        let (Some(start), Some(end)) =
            (byte_offset(&self.password, selection.start), byte_offset(&self.password, selection.end))
        else {
            return Err(invalid);
        };
        let mut next = String::with_capacity(self.password.len() + example.len());
        next.push_str(&self.password[..start]);
        next.push_str(example);
        next.push_str(&self.password[end..]);

        let cursor = selection.start + character_count(example);
        let evaluation = self.on_password_change(next);
        Ok(InsertOutcome { cursor, evaluation })
    }
}

fn initial_active(catalogue: &Catalogue) -> usize {
    catalogue.len().min(1)
}

fn deadline(now: NaiveDateTime, delay: Duration) -> NaiveDateTime {
    TimeDelta::from_std(delay).ok().and_then(|d| now.checked_add_signed(d)).unwrap_or(NaiveDateTime::MAX)
}

/// Byte offset of UTF-16 offset `unit`, or `None` when it lies past the end
/// or inside a surrogate pair.
fn byte_offset(s: &str, unit: usize) -> Option<usize> {
    let mut seen = 0;
    for (offset, c) in s.char_indices() {
        if seen == unit {
            return Some(offset);
        }
        if seen > unit {
            return None;
        }
        seen += c.len_utf16();
    }
    (seen == unit).then_some(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ManualClock;
    use crate::{Description, RuleFlags};

    fn start() -> NaiveDateTime {
        Context::default().now
    }

    fn session() -> Session<ManualClock> {
        Session::with_clock(ManualClock::new(start()), Options::default())
    }

    fn settle(session: &mut Session<ManualClock>) -> Vec<Transition> {
        session.clock().advance(TimeDelta::seconds(1));
        session.poll()
    }

    /// Three-rule catalogue that can actually be won.
    fn tiny_catalogue() -> &'static Catalogue {
        let rules = vec![
            Rule {
                id: 1,
                description: Description::Static("at least 3 characters"),
                predicate: |pw, _| character_count(pw) >= 3,
                examples: &["abc"],
                visual: None,
                flags: RuleFlags::empty(),
            },
            Rule {
                id: 2,
                description: Description::Static("contains the minute"),
                predicate: |pw, ctx| pw.contains(&ctx.now.format("%M").to_string()),
                examples: &[],
                visual: None,
                flags: RuleFlags::DYNAMIC,
            },
            Rule {
                id: 3,
                description: Description::Static("always"),
                predicate: |_, _| true,
                examples: &[],
                visual: None,
                flags: RuleFlags::META,
            },
        ];
        Box::leak(Box::new(Catalogue::from_rules(rules).unwrap()))
    }

    #[test]
    fn starts_idle_with_first_rule_active() {
        let s = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.active_count(), 1);
        assert_eq!(s.password(), "");
        assert_eq!(s.evaluate().statuses.len(), 1);
        assert!(!s.is_won());
    }

    #[test]
    fn passing_edit_reveals_after_delay() {
        let mut s = session();
        let out = s.on_password_change("abcde");
        assert!(out.all_passed());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.next_deadline(), Some(start() + TimeDelta::milliseconds(500)));

        // Not yet due.
        s.clock().advance(TimeDelta::milliseconds(499));
        assert!(s.poll().is_empty());
        assert_eq!(s.active_count(), 1);

        s.clock().advance(TimeDelta::milliseconds(1));
        assert_eq!(s.poll(), vec![Transition::RuleRevealed(2)]);
        assert_eq!(s.active_count(), 2);
        assert_eq!(s.evaluate().passed(2), Some(false));
    }

    #[test]
    fn failing_edit_schedules_nothing() {
        let mut s = session();
        s.on_password_change("abc");
        assert_eq!(s.pending_transitions(), 0);
        assert!(settle(&mut s).is_empty());
    }

    #[test]
    fn repeated_passing_edits_reveal_once() {
        let mut s = session();
        s.on_password_change("abcde");
        s.clock().advance(TimeDelta::milliseconds(100));
        s.on_password_change("abcdef");
        assert_eq!(s.pending_transitions(), 1);

        assert_eq!(settle(&mut s), vec![Transition::RuleRevealed(2)]);
        assert_eq!(s.active_count(), 2);
    }

    #[test]
    fn reset_discards_pending_reveal() {
        let mut s = session();
        s.on_password_change("abcde");
        s.reset();

        assert!(settle(&mut s).is_empty());
        assert_eq!(s.active_count(), 1);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.password(), "");
    }

    #[test]
    fn staged_progression_through_basic_rules() {
        let mut s = session();
        for (password, expect_active) in [("abcde", 2), ("abcde1", 3), ("Abcde1", 4), ("Abcde1!", 5), ("Ab!799", 6)] {
            let out = s.on_password_change(password);
            assert!(out.all_passed(), "{password} should pass {:?}", out.failing().collect::<Vec<_>>());
            settle(&mut s);
            assert_eq!(s.active_count(), expect_active, "after {password}");
        }
        // Rule 6 wants a month name.
        assert_eq!(s.evaluate().passed(6), Some(false));
    }

    #[test]
    fn add_next_rule_stops_at_catalogue_length() {
        let mut s = session();
        for expected in 2..=24 {
            assert_eq!(s.add_next_rule(), Some(expected));
        }
        assert_eq!(s.add_next_rule(), None);
        assert_eq!(s.active_count(), 24);
    }

    #[test]
    fn standard_catalogue_never_wins_with_failing_rules() {
        let mut s = session();
        while s.add_next_rule().is_some() {}
        let out = s.on_password_change("Ab!799");
        assert!(!out.all_passed());
        assert!(!s.win_pending());
        assert!(settle(&mut s).is_empty());
        assert!(!s.is_won());
    }

    #[test]
    fn tick_fails_clock_rule_once_time_moves_on() {
        let mut s = session();
        while s.active_count() < 22 {
            s.add_next_rule();
        }

        let out = s.on_password_change("at 04:30");
        assert_eq!(out.passed(22), Some(true));

        s.clock().advance(TimeDelta::minutes(1));
        let out = s.on_periodic_tick().unwrap();
        assert_eq!(out.passed(22), Some(false));
        assert_eq!(s.password(), "at 04:30");
    }

    #[test]
    fn tiny_catalogue_is_won_only_with_every_rule_active() {
        let mut s = Session::with_catalogue(tiny_catalogue(), ManualClock::new(start()), Options::default());

        // Passes rules 1-3, but only rule 1 is active.
        s.on_password_change("x30x");
        assert!(!s.win_pending());
        assert_eq!(settle(&mut s), vec![Transition::RuleRevealed(2)]);

        // Clock is now 04:30:01, minute still 30.
        s.on_password_change("x30x!");
        assert_eq!(settle(&mut s), vec![Transition::RuleRevealed(3)]);
        assert!(!s.is_won());

        s.on_password_change("x30x!!");
        assert!(s.win_pending());
        assert_eq!(s.next_deadline(), Some(start() + TimeDelta::seconds(3)));
        assert_eq!(settle(&mut s), vec![Transition::Won]);

        assert!(s.is_won());
        assert_eq!(s.active_count(), 3);
        assert!(s.evaluate().won);
        assert!(s.on_periodic_tick().is_none());

        s.reset();
        assert!(!s.is_won());
        assert_eq!(s.active_count(), 1);
        assert!(s.on_periodic_tick().is_some());
    }

    #[test]
    fn win_is_withdrawn_when_a_rule_breaks_before_it_fires() {
        let mut s = Session::with_catalogue(tiny_catalogue(), ManualClock::new(start()), Options::instant());
        s.on_password_change("x30x");
        s.poll();
        s.on_password_change("x30x!");
        s.poll();
        assert_eq!(s.active_count(), 3);

        s.on_password_change("x30x!!");
        assert!(s.win_pending());
        // Minute changes before the win is polled: rule 2 no longer holds.
        s.clock().advance(TimeDelta::minutes(1));
        assert!(s.poll().is_empty());
        assert!(!s.is_won());
    }

    #[test]
    fn insert_example_replaces_selection() {
        let mut s = Session::with_catalogue(tiny_catalogue(), ManualClock::new(start()), Options::default());
        s.on_password_change("xyz");

        let outcome = s.insert_example(1, 0, 1..2).unwrap();
        assert_eq!(s.password(), "xabcz");
        assert_eq!(outcome.cursor, 4);
        assert_eq!(outcome.evaluation.char_count, 5);
    }

    #[test]
    fn insert_example_handles_multibyte_passwords() {
        let mut s = session();
        while s.active_count() < 6 {
            s.add_next_rule();
        }
        s.on_password_change("🌑🌑");

        let outcome = s.insert_example(6, 1, 2..2).unwrap();
        assert_eq!(s.password(), "🌑March🌑");
        assert_eq!(outcome.cursor, 7);
        assert_eq!(outcome.evaluation.char_count, 9);

        assert_eq!(s.insert_example(6, 1, 1..1), Err(GameError::InvalidSelection { start: 1, end: 1, len: 9 }));
        assert_eq!(s.password(), "🌑March🌑");
    }

    #[test]
    fn insert_example_errors() {
        let mut s = session();
        s.on_password_change("ab");

        assert_eq!(s.insert_example(99, 0, 0..0), Err(GameError::UnknownRule(99)));
        assert_eq!(s.insert_example(6, 0, 0..0), Err(GameError::InactiveRule(6)));
        assert_eq!(s.insert_example(1, 0, 0..0), Err(GameError::NoSuchExample { rule: 1, index: 0 }));

        while s.active_count() < 6 {
            s.add_next_rule();
        }
        assert_eq!(s.insert_example(6, 0, 1..3), Err(GameError::InvalidSelection { start: 1, end: 3, len: 2 }));
        assert_eq!(s.password(), "ab");
    }
}

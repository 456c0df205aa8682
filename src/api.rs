use crate::engine::evaluate_active;
use crate::rules::catalogue::Catalogue;
use crate::{Rule, RuleId};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::Lazy;
use std::cell::Cell;

static DEFAULT_CATALOGUE: Lazy<Catalogue> = Lazy::new(Catalogue::standard);

/// The process-wide 24-rule catalogue.
pub fn catalogue() -> &'static Catalogue {
    &DEFAULT_CATALOGUE
}

/// Evaluation context.
///
/// Holds the instant time-reading rules (moon phase, clock time) evaluate
/// against. Descriptions and predicates of the same pass share one instant, so
/// a description never disagrees with its own check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub now: NaiveDateTime,
}

impl Context {
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
            let time = NaiveTime::from_hms_opt(4, 30, 0).unwrap();
            Self { now: NaiveDateTime::new(date, time) }
        } else {
            Self { now: Local::now().naive_local() }
        }
    }
}

// --- Clocks ------------------------------------------------------------------

/// Source of "now" for a [`Session`](crate::Session).
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn context(&self) -> Context {
        Context { now: self.now() }
    }
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Used for frozen `--reference` runs
/// and for driving sessions deterministically.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

// --- Results -----------------------------------------------------------------

/// Outcome of one active rule in one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStatus {
    pub id: RuleId,
    pub passed: bool,
    /// Description rendered at the evaluation instant.
    pub description: String,
}

/// Result of evaluating every active rule against the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One entry per active rule, in id order.
    pub statuses: Vec<RuleStatus>,
    pub won: bool,
    /// Password length as the game counts it.
    pub char_count: usize,
}

impl Evaluation {
    /// True when every active rule holds (vacuously true with none active).
    pub fn all_passed(&self) -> bool {
        self.statuses.iter().all(|s| s.passed)
    }

    pub fn status(&self, id: RuleId) -> Option<&RuleStatus> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn passed(&self, id: RuleId) -> Option<bool> {
        self.status(id).map(|s| s.passed)
    }

    pub fn failing(&self) -> impl Iterator<Item = &RuleStatus> {
        self.statuses.iter().filter(|s| !s.passed)
    }

    /// Order rules are listed in after a status refresh: statuses are applied
    /// in id order, a passing rule moves to the bottom and a failing one to the
    /// top. That leaves failing rules newest-first above passing rules
    /// oldest-first.
    pub fn display_order(&self) -> Vec<RuleId> {
        let failing = self.statuses.iter().rev().filter(|s| !s.passed).map(|s| s.id);
        let passing = self.statuses.iter().filter(|s| s.passed).map(|s| s.id);
        failing.chain(passing).collect()
    }
}

/// Catalogue metadata for initial rendering and example insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: RuleId,
    pub description: String,
    pub examples: Vec<&'static str>,
    pub visual: Option<&'static str>,
    pub dynamic: bool,
    pub hidden: bool,
    pub meta: bool,
}

impl RuleInfo {
    pub(crate) fn from_rule(rule: &Rule, ctx: &Context) -> Self {
        Self {
            id: rule.id,
            description: rule.description.render(ctx),
            examples: rule.examples.to_vec(),
            visual: rule.visual,
            dynamic: rule.is_dynamic(),
            hidden: rule.is_hidden(),
            meta: rule.is_meta(),
        }
    }
}

/// Evaluate `password` against the first `active` rules of the default
/// catalogue at the current local time.
///
/// # Example
/// ```
/// use password_rules::evaluate;
///
/// let out = evaluate("Hello1!", 4);
/// assert!(out.all_passed());
/// assert_eq!(out.statuses.len(), 4);
/// ```
pub fn evaluate(password: &str, active: usize) -> Evaluation {
    evaluate_with(password, active, &Context { now: Local::now().naive_local() })
}

/// Same as [`evaluate`], against an explicit instant. `won` is reported when
/// the whole catalogue is active and passing.
pub fn evaluate_with(password: &str, active: usize, ctx: &Context) -> Evaluation {
    let catalogue = catalogue();
    let mut evaluation = evaluate_active(catalogue, active, password, ctx);
    evaluation.won = evaluation.statuses.len() == catalogue.len() && evaluation.all_passed();
    evaluation
}

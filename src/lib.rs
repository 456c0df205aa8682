extern crate self as password_rules;

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
mod rules;

pub use api::{
    Clock, Context, Evaluation, ManualClock, RuleInfo, RuleStatus, SystemClock, catalogue, evaluate, evaluate_with,
};
pub use config::Options;
pub use engine::{InsertOutcome, Phase, Session, Transition};
pub use error::{ConfigError, GameError};
pub use rules::catalogue::Catalogue;
pub use rules::helpers;

// --- Rule model --------------------------------------------------------------

/// 1-based position of a rule in the catalogue. Defines both display order and
/// activation order; never reused.
pub type RuleId = u32;

/// Predicate over the current password. The `Context` carries the instant the
/// evaluation runs at, so time-reading rules stay pure given their inputs.
pub type Predicate = fn(&str, &Context) -> bool;

bitflags::bitflags! {
    /// Display and refresh metadata. None of these alter predicate truth.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleFlags: u8 {
        /// Description or predicate depends on the clock; re-evaluated on tick.
        const DYNAMIC = 1 << 0;
        /// Shown as unmet until discovered (presentation only).
        const HIDDEN  = 1 << 1;
        /// Rule about the state of other rules rather than the password text.
        const META    = 1 << 2;
    }
}

/// Rule text: either fixed, or computed from the evaluation instant.
#[derive(Clone, Copy)]
pub enum Description {
    Static(&'static str),
    Computed(fn(&Context) -> String),
}

impl Description {
    /// Render the description as seen at `ctx.now`.
    pub fn render(&self, ctx: &Context) -> String {
        match self {
            Description::Static(text) => (*text).to_string(),
            Description::Computed(describe) => describe(ctx),
        }
    }
}

impl From<&'static str> for Description {
    fn from(text: &'static str) -> Self {
        Description::Static(text)
    }
}

impl std::fmt::Debug for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Description::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Description::Computed(_) => f.write_str("Computed(<function>)"),
        }
    }
}

/// A password rule: an id, a description, and a predicate over the password.
///
/// Rules are immutable and built through the `rule!` macro in
/// `src/rules/catalogue.rs`.
pub struct Rule {
    pub id: RuleId,
    pub description: Description,
    pub predicate: Predicate,
    /// Strings offered as clickable insertions. Never affect validity.
    pub examples: &'static [&'static str],
    /// Optional glyph palette shown next to the rule.
    pub visual: Option<&'static str>,
    pub flags: RuleFlags,
}

impl Rule {
    pub fn is_dynamic(&self) -> bool {
        self.flags.contains(RuleFlags::DYNAMIC)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(RuleFlags::HIDDEN)
    }

    pub fn is_meta(&self) -> bool {
        self.flags.contains(RuleFlags::META)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("predicate", &"<function>")
            .field("examples", &self.examples)
            .field("flags", &self.flags)
            .finish()
    }
}

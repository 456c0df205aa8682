//! Single evaluation pass.
//!
//! Predicates are plain functions and are not expected to fail, but the
//! dynamic ones read the clock and a misbehaving rule must not take the game
//! down with it. Each predicate runs under `catch_unwind`; a panic counts as
//! the rule failing and is reported through `tracing::warn!`.

use crate::api::{Context, Evaluation, RuleStatus};
use crate::rules::catalogue::Catalogue;
use crate::rules::helpers::character_count;
use crate::Rule;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

/// Run `rule` against `password`; `false` if the predicate panics.
pub(crate) fn check_rule(rule: &Rule, password: &str, ctx: &Context) -> bool {
    let predicate = rule.predicate;
    match panic::catch_unwind(AssertUnwindSafe(|| predicate(password, ctx))) {
        Ok(passed) => {
            trace!(rule = rule.id, passed, "rule evaluated");
            passed
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "<non-string panic>".to_string());
            warn!(rule = rule.id, %reason, "rule predicate panicked; treating as failed");
            false
        }
    }
}

/// Evaluate the first `active` rules of `catalogue` (clamped to its length).
///
/// `won` is always `false` here; callers decide what winning means for them.
pub(crate) fn evaluate_active(catalogue: &Catalogue, active: usize, password: &str, ctx: &Context) -> Evaluation {
    let active = active.min(catalogue.len());

    let statuses: Vec<RuleStatus> = catalogue.rules()[..active]
        .iter()
        .map(|rule| RuleStatus {
            id: rule.id,
            passed: check_rule(rule, password, ctx),
            description: rule.description.render(ctx),
        })
        .collect();

    let evaluation = Evaluation { statuses, won: false, char_count: character_count(password) };
    debug!(
        active,
        failing = evaluation.failing().count(),
        char_count = evaluation.char_count,
        "evaluation pass"
    );
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Description, RuleFlags};

    fn panicking_rule() -> Rule {
        Rule {
            id: 1,
            description: Description::Static("never settles"),
            predicate: |_, _| panic!("clock unavailable"),
            examples: &[],
            visual: None,
            flags: RuleFlags::DYNAMIC,
        }
    }

    fn accepting_rule() -> Rule {
        Rule {
            id: 2,
            description: Description::Static("always fine"),
            predicate: |_, _| true,
            examples: &[],
            visual: None,
            flags: RuleFlags::empty(),
        }
    }

    #[test]
    fn panicking_predicate_counts_as_failed() {
        let catalogue = Catalogue::from_rules(vec![panicking_rule(), accepting_rule()]).unwrap();
        let out = evaluate_active(&catalogue, 2, "anything", &Context::default());

        assert_eq!(out.passed(1), Some(false));
        assert_eq!(out.passed(2), Some(true));
        assert!(!out.all_passed());
    }

    #[test]
    fn descriptions_render_per_pass() {
        let catalogue = Catalogue::from_rules(vec![accepting_rule()]);
        assert!(catalogue.is_none(), "ids must start at 1");

        let catalogue = Catalogue::from_rules(vec![panicking_rule(), accepting_rule()]).unwrap();
        let out = evaluate_active(&catalogue, 1, "", &Context::default());
        assert_eq!(out.statuses.len(), 1);
        assert_eq!(out.statuses[0].description, "never settles");
    }
}

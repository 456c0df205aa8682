//! Game progression engine.
//!
//! The engine is the single owner of mutable game state. A UI (or the bundled
//! CLI) feeds it two kinds of input and reads evaluations back:
//!
//! ```text
//! password edit ──▶ Session::on_password_change ──┐
//!                                                 ├─▶ evaluate_active (evaluate.rs)
//! timer tick ─────▶ Session::on_periodic_tick ────┘      - one instant per pass
//!                                                        - panics = rule fails
//!                         │
//!                         v
//!               Schedule (schedule.rs)
//!                 - Reveal { expected_active } after reveal_delay
//!                 - Win after win_delay
//!                         │
//! driver ─────────▶ Session::poll ──▶ Vec<Transition>
//!                     - generation / active_count guards at fire time
//! ```
//!
//! ## Responsibilities by module
//!
//! - `evaluate.rs`: runs predicates for a prefix of the catalogue and turns
//!   them into an [`Evaluation`](crate::Evaluation).
//! - `schedule.rs`: the pending delayed transitions and their deadlines.
//! - `session.rs`: the `Idle → Playing → Won` state machine, reset, and
//!   example insertion.
//!
//! Only one pass runs at a time; `Session` takes `&mut self` for every
//! transition, so there is no reentrancy to guard against.
//!
//! ## Debugging
//!
//! The engine logs through `tracing`. The CLI reads its filter from
//! `PASSWORD_RULES_LOG` (for example `PASSWORD_RULES_LOG=password_rules=trace`
//! prints every predicate outcome).

#[path = "engine/evaluate.rs"]
mod evaluate;
#[path = "engine/schedule.rs"]
mod schedule;
#[path = "engine/session.rs"]
mod session;

pub(crate) use evaluate::evaluate_active;
pub use schedule::Transition;
pub use session::{InsertOutcome, Phase, Session};

//! Routing engine
//!
//! The decision core of the flow: given the current position and an
//! answer, deterministically compute what comes next.
//!
//! Two pieces compose:
//!
//! - the **matcher** ([`RoutingRule::matches`]) - does one rule apply to
//!   one answer?
//! - the **router** ([`decide_next_node`]) - of all candidate rules for a
//!   question, which single one fires, and what outcome does it derive?
//!
//! Both are pure functions of their inputs. Nothing here performs I/O or
//! holds state, so evaluation may run concurrently across any number of
//! flow sessions.

pub mod router;
pub mod rule;

pub use router::{Outcome, decide_next_node};
pub use rule::{MatchType, NextNodeType, RoutingRule};

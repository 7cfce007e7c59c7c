//! # psyref-render
//!
//! Text output for psyref hosts: the patient handout and the full card view.
//!
//! Both are pure functions of a single [`Card`](psyref_contracts::card::Card).
//! [`write_handout`] is the only function here that touches the filesystem.

pub mod handout;
pub mod view;

pub use handout::{handout, handout_file_name, medicine_names, write_handout};
pub use view::render_card;

// ── Tests ─────────────────────────────────────────────────────────────────────

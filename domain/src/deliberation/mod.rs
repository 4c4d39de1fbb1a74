//! Deliberation domain: the shapes that flow between council stages.
//!
//! - [`mode::DeliberationMode`]: which entry point a caller wants
//! - [`phase::Phase`]: progress stages reported while a call runs
//! - [`reply`]: one provider's answer or its in-band failure
//! - [`value_objects`]: response/critique/confidence maps and per-mode results

pub mod mode;
pub mod phase;
pub mod reply;
pub mod value_objects;

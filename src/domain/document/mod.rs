//! Document domain module.
//!
//! A `Project` is a user's request for one document (a long-form report or
//! a slide deck) about a topic. Its `Outline` declares the ordered titles
//! that become `Section`s; every AI edit of a section is audited as a
//! `Refinement`.

mod errors;
mod kind;
mod outline;
mod project;
mod refinement;
mod section;

pub use errors::DocumentError;
pub use kind::{DocumentKind, SectionKind};
pub use outline::Outline;
pub use project::{Project, MAX_TITLE_LENGTH};
pub use refinement::{Refinement, FEEDBACK_DISLIKE, FEEDBACK_LIKE};
pub use section::{content_blocks, sort_by_order, Section};

//! In-memory comment table: search filter, column sort and pagination.
//!
//! [`view::compute_view`] is a pure function of the comment collection and a
//! [`config::ViewConfig`]; it never touches the collection it reads from.

pub mod config;
pub mod view;

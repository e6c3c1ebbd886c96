//! In-process stores for users' projects, tasks and the waitlist.

pub mod repositories;

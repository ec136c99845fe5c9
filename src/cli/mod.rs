//! Command implementations and terminal rendering.

pub mod activity;
pub mod offers;
pub mod referrals;
pub mod summary;
pub mod ui;

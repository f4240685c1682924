//! Client for the Canopeum forestation platform: typed backend calls, the
//! session post store, the paginated site feed and the state of the pages
//! and dialogs built on top of them.

pub mod api;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod feed;
pub mod locale;
pub mod pages;
pub mod validators;

#[cfg(test)]
mod testing;

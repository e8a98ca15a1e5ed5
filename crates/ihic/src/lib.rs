//! Inventory and halal-certificate page generator for i-HIC.
//!
//! [`inventory`] reads the spreadsheet, [`expiry`] classifies item and
//! certificate dates against an explicit "today", and [`site`] renders one
//! detail page per record plus an index page.

pub mod config;
pub mod error;
pub mod expiry;
pub mod inventory;
pub mod site;
pub mod telemetry;

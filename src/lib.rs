//! Native core of the Code Scan app: scan session, barcode generator and the
//! JSON UI the Android shell renders. The host talks to it through the JNI
//! entry points in [`router`].

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod error;
pub mod features;
mod i18n;
mod logging;
mod router;
pub mod state;
pub mod ui;

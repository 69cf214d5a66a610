//! Matrix keypad scanner.
//!
//! `kscan` scans a row/column keypad matrix, decodes short and long presses of every key, and
//! hands the decoded characters to a consumer through a channel. The same scan engine runs
//! either from a periodic timer interrupt ([`matrix::InterruptScanner`]) or as a task on an async
//! executor ([`matrix::CooperativeScanner`]).
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub mod channel;
pub mod config;
pub mod debounce;
pub(crate) mod driver;
pub mod error;
pub mod event;
pub mod lines;
pub mod matrix;
pub mod processor;
pub mod sim;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use channel::{EventChannel, FifoChannel, OverwriteChannel};
pub use config::KeypadConfig;
pub use error::KeypadError;
pub use event::{KeyEvent, PressKind};
pub use lines::{KeypadLines, PinLines};
pub use matrix::{CooperativeScanner, InterruptScanner, ScanEngine};
pub use processor::{CharSink, forward_keys, get_key, try_get_key};

/// Raw mutex guarding the channels, shared with interrupt context
pub type RawMutex = CriticalSectionRawMutex;

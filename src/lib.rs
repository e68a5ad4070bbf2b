//! Handlerstate: a handler-driven finite state machine engine.
//!
//! Callers register handlers that react to named changes and to the
//! implicit `enter`/`leave` lifecycle of states, then drive the machine by
//! submitting change names. The engine resolves the destination, runs every
//! applicable handler in ascending priority order and records the new state.
//!
//! # Core Concepts
//!
//! - **Change**: `enter`, `leave` or a caller-defined name
//! - **Handler**: a callback gated on change, source and destination
//! - **History**: bounded log of visited states
//! - **Trace**: structured events for every decision the engine makes
//!
//! # Example
//!
//! ```rust
//! use handlerstate::builder::{on_change, on_enter, on_leave, EngineBuilder};
//! use handlerstate::core::{Callback, StateId};
//! use std::sync::{Arc, Mutex};
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let record = |label: &'static str| {
//!     let log = Arc::clone(&log);
//!     Callback::infallible(move || log.lock().unwrap().push(label))
//! };
//!
//! let mut engine = EngineBuilder::new()
//!     .initial("off")
//!     .name("lamp")
//!     .build()
//!     .unwrap();
//!
//! engine.add_state_handler(on_leave("off", record("leave off")));
//! engine.add_state_handler(on_change("switch", "off", "on", record("switch")));
//! engine.add_state_handler(on_enter("on", record("enter on")));
//!
//! assert_eq!(engine.trigger_change("switch"), StateId::from("on"));
//! assert_eq!(*log.lock().unwrap(), vec!["switch", "leave off", "enter on"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod registry;
pub mod trace;

// Re-export commonly used types
pub use builder::{EngineBuilder, HandlerBuilder};
pub use config::EngineConfig;
pub use crate::core::{Callback, ChangeName, HandlerCriteria, HandlerSpec, StateId};
pub use engine::{Engine, Trigger};
pub use trace::{TraceEvent, TraceSink};

//! Light switch example.
//!
//! Demonstrates:
//! - Enter/leave hooks alongside a custom `switch` change
//! - Priority overrides reordering the default firing order
//! - Removing a handler by callback identity
//! - Trace output through `tracing`
//!
//! Run with `RUST_LOG=debug cargo run --example light_switch` for the full trace.

use handlerstate::builder::{on_change, on_enter, on_leave, EngineBuilder};
use handlerstate::core::{Callback, HandlerCriteria};
use tracing_subscriber::EnvFilter;

fn say(message: &'static str) -> Callback {
    Callback::infallible(move || println!("  {message}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Light Switch ===\n");

    let mut machine = EngineBuilder::new()
        .initial("off")
        .name("FIRST")
        .with_tracing()
        .build()
        .expect("valid configuration");

    machine.add_state_handler(on_enter("off", say("off: onEnter")));
    machine.add_state_handler(on_leave("off", say("off: onExit")));
    machine.add_state_handler(
        on_change("switch", "off", "on", say("transition action for \"switch\" in \"off\" state"))
            .with_comment("off-switch-on"),
    );
    machine.add_state_handler(on_enter("on", say("on: onEnter 1")));
    machine.add_state_handler(on_enter("on", say("on: onEnter 2")).with_priority(-5.0));
    machine.add_state_handler(on_leave("on", say("on: onExit")));
    machine.add_state_handler(
        on_change("switch", "on", "off", say("transition action for \"switch\" in \"on\" state"))
            .with_comment("on-switch-off"),
    );

    let removable = say("transition action for \"switch\" in \"on\" state 2");
    machine.add_state_handler(
        on_change("switch", "on", "off", removable.clone()).with_comment("on-switch-off"),
    );
    machine.remove_state_handler(
        HandlerCriteria::new()
            .change("switch")
            .from("on")
            .callback(&removable),
    );

    println!("current state: {}", machine.current_state());
    for change in [
        "switch", "switch", "on", "off", "enter", "leave", "switch", "switch", "switch",
    ] {
        println!("\n> {change}");
        let state = machine.trigger_change(change);
        println!("current state: {state}");
    }

    println!("\nHistory:");
    for (i, state) in machine.history().iter().enumerate() {
        println!("  {}. {}", i + 1, state);
    }
}

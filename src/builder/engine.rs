//! Builder for constructing engines.

use crate::builder::error::BuildError;
use crate::config::EngineConfig;
use crate::core::StateId;
use crate::engine::Engine;
use crate::trace::{TraceSink, Tracer, TracingSink};

type NameGenerator = Box<dyn FnOnce() -> String>;

/// Builder for [`Engine`] with a fluent API.
///
/// Unset fields take their [`EngineConfig`] defaults. When no name is given
/// the name generator is called exactly once during [`build`](Self::build).
pub struct EngineBuilder {
    config: EngineConfig,
    name_generator: Option<NameGenerator>,
    trace: Option<Box<dyn TraceSink>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            name_generator: None,
            trace: None,
        }
    }

    /// Start from a loaded configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.config.initial_state = state.into();
        self
    }

    pub fn max_history(mut self, n: usize) -> Self {
        self.config.max_history = n;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.instance_name = Some(name.into());
        self
    }

    /// Replace the default name generator.
    pub fn name_generator<F>(mut self, generator: F) -> Self
    where
        F: FnOnce() -> String + 'static,
    {
        self.name_generator = Some(Box::new(generator));
        self
    }

    /// Attach a trace sink.
    pub fn trace(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }

    /// Attach a [`TracingSink`].
    pub fn with_tracing(self) -> Self {
        self.trace(TracingSink)
    }

    pub fn build(self) -> Result<Engine, BuildError> {
        if self.config.max_history == 0 {
            return Err(BuildError::InvalidMaxHistory);
        }

        let EngineConfig {
            initial_state,
            max_history,
            instance_name,
        } = self.config;
        let generator = self.name_generator;
        let name = instance_name.unwrap_or_else(|| match generator {
            Some(generate) => generate(),
            None => default_instance_name(),
        });

        Ok(Engine::from_parts(
            initial_state,
            max_history,
            Tracer::new(name, self.trace),
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// First eight hex digits of a random UUID.
pub fn default_instance_name() -> String {
    let mut name = uuid::Uuid::new_v4().simple().to_string();
    name.truncate(8);
    name
}

use infoprox_core::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::builder::GraphBuilder;
use crate::config::GenConfig;
use crate::context::{GenContext, Layout};
use crate::pass::GenPass;
use crate::placement::Placement;
use crate::verify::Verifier;

/// The top-level generation orchestrator.
///
/// Owns the configuration and the ordered list of passes. Every pass shares
/// one RNG seeded from the config, so a seed always yields the same world.
pub struct Generator {
    config: GenConfig,
    passes: Vec<Box<dyn GenPass>>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("passes", &self.passes.len())
            .finish()
    }
}

impl Generator {
    /// A generator with no passes.
    pub fn empty(config: GenConfig) -> Self {
        Self {
            config,
            passes: Vec::new(),
        }
    }

    /// The standard pipeline: graph, placement, verification.
    pub fn new(config: GenConfig) -> Self {
        let mut generator = Self::empty(config);
        generator.add_pass(GraphBuilder);
        generator.add_pass(Placement);
        generator.add_pass(Verifier);
        generator
    }

    /// Register a pass. Passes run in registration order.
    pub fn add_pass<P: GenPass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    /// The configuration in use.
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Run every pass and return the finished world.
    pub fn run(&mut self) -> World {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut world = World::new(self.config.theme, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layout = Layout::default();

        for pass in &mut self.passes {
            let mut ctx = GenContext {
                world: &mut world,
                rng: &mut rng,
                layout: &mut layout,
                config: &self.config,
            };
            pass.run(&mut ctx);
            debug!(pass = pass.name(), rooms = world.len(), "pass finished");
        }

        world.derived_seed = rng.random_range(0..1_000_000);
        debug!(seed, derived = world.derived_seed, "world generated");
        world
    }
}

/// Generate a world with the standard pipeline.
pub fn generate(config: &GenConfig) -> World {
    Generator::new(config.clone()).run()
}

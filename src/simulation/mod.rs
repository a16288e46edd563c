//! Simulation driver.
//!
//! Ties together:
//! - the initializer and boundary enforcer (start-up)
//! - the trend engine and time integrator (each step)
//! - the stability monitor and output sinks
//!
//! # Example
//! ```no_run
//! use globagrim::config::ModelConfig;
//! use globagrim::io::MemorySink;
//! use globagrim::simulation::Simulation;
//!
//! let config = ModelConfig::default().with_resolution(16, 8, 4);
//! let mut sim = Simulation::new(config).unwrap();
//! let mut sink = MemorySink::new();
//! let result = sim.run(&mut sink).unwrap();
//! println!("{} steps, {} snapshots", result.n_steps, result.n_outputs);
//! ```

mod runner;

pub use runner::{Simulation, SimulationResult};

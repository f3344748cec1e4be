//! Procedural world generation for Infoprox.
//!
//! A [`Generator`] runs an ordered list of [`GenPass`]es over a shared
//! [`GenContext`]: the [`GraphBuilder`] lays out rooms and passages,
//! [`Placement`] adds the vault, goal gate, keys, locks, and artifacts, and
//! the [`Verifier`] repairs anything that would leave the world unfinishable.
//! [`audit()`] reports the same guarantees on any world, generated or mid-play.

/// Structural checks and the solvability verdict.
pub mod audit;
/// Graph builder pass and connectivity stitching.
pub mod builder;
/// Configuration for generation runs.
pub mod config;
/// Mutable context passed to passes.
pub mod context;
/// Top-level generation orchestrator.
pub mod generator;
/// The trait that all generation passes implement.
pub mod pass;
/// Vault, lock, key, and artifact placement pass.
pub mod placement;
/// Solvability verification and repair pass.
pub mod verify;

/// Re-exports of [`audit::audit`], [`audit::audit_from`], [`audit::key_closure`], and [`audit::Audit`].
pub use audit::{ARTIFACTS_REQUIRED, Audit, audit, audit_from, key_closure};
/// Re-export of [`builder::GraphBuilder`].
pub use builder::GraphBuilder;
/// Re-exports of [`config::GenConfig`] and the room bounds.
pub use config::{GenConfig, MAX_ROOMS, MIN_ROOMS};
/// Re-exports of [`context::GenContext`] and [`context::Layout`].
pub use context::{GenContext, Layout};
/// Re-exports of [`generator::Generator`] and [`generator::generate`].
pub use generator::{Generator, generate};
/// Re-export of [`pass::GenPass`].
pub use pass::GenPass;
/// Re-export of [`placement::Placement`].
pub use placement::{KEY_COUNT, Placement};
/// Re-export of [`verify::Verifier`].
pub use verify::Verifier;

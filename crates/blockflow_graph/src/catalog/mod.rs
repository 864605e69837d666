// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ready-made block type catalogs built on the core engine.

pub mod logic;
pub mod signal;

pub use logic::create_logic_registry;
pub use signal::create_signal_registry;

// SPDX-License-Identifier: MIT OR Apache-2.0
pub mod batch;
pub mod registry;
pub mod settings;

pub use batch::{BatchGenerator, GeneratedSet, GeneratedTheme};
pub use registry::IdentityRegistry;
pub use settings::SettingsRegistry;

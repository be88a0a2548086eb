//! Savings provisions and provision loading

mod data;
pub mod loader;

pub use data::{Provision, ProvisionKind};
pub use loader::{load_provisions, load_provisions_from_reader};

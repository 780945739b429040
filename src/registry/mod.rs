//! Registry addressing for Artifact Registry and legacy Container Registry.

pub mod address;

pub use address::{host_for, image_path_for, RegistryAddress};

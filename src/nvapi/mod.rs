/// NVAPI driver layer: library loading, status codes, DVC calls.
pub mod dvc;
pub mod errors;
pub mod library;
pub mod status;

pub use dvc::NvapiProvider;
pub use errors::NvapiError;

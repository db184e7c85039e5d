// Infrastructure layer module
// Database adapters for the domain repository ports

pub mod repositories;

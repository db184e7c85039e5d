// Repository interfaces (ports)
// Implementations live in the infrastructure layer

pub mod income_repository;

pub use income_repository::IncomeRepository;

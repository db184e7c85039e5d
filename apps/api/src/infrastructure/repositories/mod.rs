// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_income_repository;

pub use postgres_income_repository::PostgresIncomeRepository;

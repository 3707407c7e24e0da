//! Database integration for seeding generated data.

pub mod seeder;

pub use seeder::{SeedError, Seeder};

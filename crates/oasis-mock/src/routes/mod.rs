pub mod docs;
pub mod health;
pub mod problems;
pub mod weather;

pub mod health;
pub mod owner;

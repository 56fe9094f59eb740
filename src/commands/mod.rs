pub mod check;
pub mod config;
pub mod prepare;
pub mod score;

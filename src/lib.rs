// src/lib.rs — Library root for twelve-angry-llms

pub mod cli;
pub mod infra;
pub mod judge;
pub mod provider;

pub mod card;
pub mod command;
pub mod controller;
pub mod domain;
pub mod factory;
pub mod filter;
#[cfg(test)]
pub(crate) mod testing;

#[macro_use]
extern crate diesel;

pub mod controllers;
pub mod core;
pub mod games;
pub mod models;

#[cfg(test)]
mod tests;

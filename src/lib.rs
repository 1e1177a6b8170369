#[macro_use]
extern crate rocket;

pub mod api;
pub mod block;
pub mod config;
pub mod feed;
pub mod forms;
pub mod http;
pub mod models;
pub mod render;
pub mod store;

#[cfg(test)]
mod test_utils;

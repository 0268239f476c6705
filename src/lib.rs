extern crate chrono;
extern crate colored;
extern crate serde;
extern crate serde_json;
extern crate uuid;

mod config;
mod shopping_list;

pub mod color;
pub mod error;
pub mod filter;
pub mod forms;
pub mod item;
pub mod list_view;
pub mod storage;
pub mod tag;
pub mod traits;
pub mod viewer;

pub use config::*;
pub use shopping_list::*;

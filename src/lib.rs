pub mod config;
pub mod context;
pub mod controller;
pub mod domain;
pub mod repository;
pub mod service;
pub mod util;

pub use context::{SubmitHandler, UploadFormContext};

mod common;
mod lifecycle;
mod service;

pub mod client;

pub use client::HttpFileFetcher;

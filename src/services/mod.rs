#[cfg(test)]
pub mod memory;
pub mod word_service;

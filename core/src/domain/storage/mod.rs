pub mod ports;

pub use ports::KeyValueStore;

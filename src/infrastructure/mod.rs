pub mod classifiers;
pub mod transports;

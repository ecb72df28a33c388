pub mod bestfirst;
pub mod scorer;

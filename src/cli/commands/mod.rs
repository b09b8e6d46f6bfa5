pub mod seed;
pub mod serve;
pub mod token;

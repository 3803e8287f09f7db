pub mod roulette;
pub mod wheel;

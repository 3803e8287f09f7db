pub mod roulette_room;

pub use roulette_room::{create_router, RoomRegistry};

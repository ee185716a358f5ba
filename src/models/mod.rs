pub mod catalog;
pub mod seat;

pub use catalog::{Catalog, Cinema, Screen, Showtime, ShowingKey};

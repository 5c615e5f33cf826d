//! Domain entities - stops and their departure schedules

mod schedule;
mod stop;

pub use schedule::{
    departure_board, sort_departures, Itinerary, RouteDeparture, RouteTimetable, ScheduleItem,
};
pub use stop::{nearest_stop, StopCandidate};

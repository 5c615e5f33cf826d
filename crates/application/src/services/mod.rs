//! Application services - Use case implementations

mod stop_search;

pub use stop_search::{
    DepartureBoard, EmptyReason, SearchResult, Stage, StopBoard, StopSearchService,
};

// Congestion engine: forecast rows -> selected slot -> classified zones -> recommendations.
// Everything except handlers and the loader is a pure function over fetched data.

pub mod deriver;
pub mod handlers;
pub mod loader;
pub mod ranker;
pub mod slots;
pub mod view;
pub mod zones;

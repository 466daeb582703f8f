pub mod config;
pub mod fetch;
pub mod itinerary;
pub mod output;
pub mod parser;
pub mod passenger;
pub mod planner;
pub mod publish;
pub mod roster;
pub mod sources;

pub mod cards;
pub mod chart;
pub mod cli;
pub mod display;
pub mod error;
pub mod orchestrator;
pub mod selection;
pub mod slots;
pub mod solver;

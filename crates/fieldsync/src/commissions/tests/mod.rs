mod calculator;
mod common;
mod placement;

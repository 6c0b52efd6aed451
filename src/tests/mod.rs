mod signal;
mod stats;

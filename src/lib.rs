use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;

// Search space and results
// ------------------------
pub mod path;
pub mod result;
pub mod space;

// Frontier strategies and the engine
// ----------------------------------
pub mod algorithms;
pub mod engine;
pub mod frontiers;

// Problems
// --------
pub mod maze_2d;

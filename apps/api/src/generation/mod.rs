// Heuristic text generation: fixed vocabularies + template filling.
// Randomness only picks verbs and metrics, through `random::RandomSource`.

pub mod generator;
pub mod handlers;
pub mod heuristics;
pub mod random;
pub mod vocabulary;

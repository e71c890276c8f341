use crate::normalize::Token;
use crate::request::SortOutcome;

/// Position of a candidate token within the reference sequence.
/// `NotFound` orders after every `Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Found(usize),
    NotFound,
}

/// Index of the first occurrence of `token` in `sequence`.
pub fn rank_of(sequence: &[Token], token: &Token) -> Rank {
    sequence
        .iter()
        .position(|t| t == token)
        .map_or(Rank::NotFound, Rank::Found)
}

/// Order candidates by where their token first appears in `sequence`.
/// The sort is stable: equal ranks keep their input order.
pub fn rank_candidates<K>(sequence: &[Token], candidates: Vec<(K, Token)>) -> Vec<(K, Token)> {
    let mut ranked: Vec<(Rank, (K, Token))> = candidates
        .into_iter()
        .map(|(key, token)| (rank_of(sequence, &token), (key, token)))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, pair)| pair).collect()
}

/// Receives progress from a sort run. Implementations decide where it goes.
pub trait SortObserver {
    fn candidate_read(&self, _key: &str, _raw: &str, _token: &Token) {}
    fn main_read(&self, _raw: &str, _sequence: &[Token]) {}
    fn sorted(&self, _outcome: &SortOutcome) {}
}

pub struct NoopObserver;

impl SortObserver for NoopObserver {}

pub mod normalize;
pub mod rank;
pub mod request;
pub mod similarity;
pub mod words;

pub use normalize::{main_sequence, normalize, Token, FUZZY_CUTOFF};
pub use rank::{rank_candidates, rank_of, NoopObserver, Rank, SortObserver};
pub use request::{CandidateImages, RankedImage, SortOutcome, SortRequest};
pub use similarity::{close_matches, ratio, SimilarityError};

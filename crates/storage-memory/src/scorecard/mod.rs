mod repository;

pub use repository::ScorecardRepository;

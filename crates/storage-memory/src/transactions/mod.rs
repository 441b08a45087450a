mod model;
mod repository;

pub use model::TransactionRow;
pub use repository::TransactionRepository;

pub mod token;
pub mod user;

pub use token::InMemoryTokenRepository;
pub use user::InMemoryUserRepository;

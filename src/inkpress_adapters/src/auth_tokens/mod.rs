pub mod jwt;

pub use jwt::{Claims, TokenConfig, TokenError, TokenIssuer};

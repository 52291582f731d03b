//! Services - business rules composed over the repository ports.

mod social;

pub use social::SocialService;

#[cfg(test)]
mod tests;

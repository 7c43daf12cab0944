pub mod errors;
pub mod db;
pub mod user;
pub mod cat;
pub mod toy;
pub mod cat_toy;
pub mod feeding;
pub mod photo;

#[cfg(test)]
mod tests;

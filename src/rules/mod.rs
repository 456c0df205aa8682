pub mod catalogue;
pub mod helpers;
pub(crate) mod tables;

#[cfg(test)]
mod tests;

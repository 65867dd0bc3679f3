//! Game implementations.

pub mod twenty48;

pub mod posting;
pub mod vacancy;

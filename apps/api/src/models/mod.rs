pub mod company;
pub mod relocation;

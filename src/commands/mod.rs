pub mod all;
pub mod single;

pub mod codec;
pub mod generator;
pub mod scanner;
pub mod share;
pub mod storage;

pub mod compiler;
pub mod gesture;
pub mod wire;

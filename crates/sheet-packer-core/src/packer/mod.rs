pub mod guillotine;

pub use guillotine::PackNode;

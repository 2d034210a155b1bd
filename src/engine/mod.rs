pub mod record;
pub mod spec;

pub mod normalize;
pub mod additions;
pub mod render;

pub use additions::Additions;
pub use normalize::normalize;
pub use record::ContainerRecord;
pub use render::render_block;

pub mod inspect;
pub mod source;

pub use source::{ContainerHandle, ContainerSource, DockerSource};

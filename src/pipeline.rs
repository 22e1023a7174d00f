pub mod assembly;
pub mod frame;
pub mod present;
pub mod renderer;
pub mod shaders;

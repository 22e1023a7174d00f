use thiserror::Error;

/// Errors raised while loading resources or assembling scene data.
///
/// The per-frame rendering path never produces these: degenerate or
/// off-screen triangles are skipped, not reported.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("pixel data holds {actual} bytes, a {width}x{height} RGB image needs {expected}")]
    InvalidPixelData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("texture has no pixels ({width}x{height})")]
    EmptyTexture { width: u32, height: u32 },

    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

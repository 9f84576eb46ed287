//! Memegen Render Library
//!
//! Exports a composed scene to pixels. The default implementation composites
//! on the CPU with `image` and rasterizes text with `ab_glyph`.

mod assets;
mod renderer;
mod software;
mod text;

pub use assets::{AssetSource, DirectoryAssetSource, MemoryAssetSource};
pub use renderer::{PngRenderResult, RenderContext, RenderResult, Renderer, RendererError, encode_png};
pub use software::SoftwareRenderer;
pub use text::TextRasterizer;

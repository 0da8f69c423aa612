pub mod sql_renderer;

pub use sql_renderer::{RenderedQuery, SqlRenderer};

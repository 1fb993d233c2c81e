//! Rendering of tagged elements: markup, plain text, Markdown and JSON.

mod json;
mod markdown;
mod options;
mod tagged;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{LineJoin, RenderOptions};
pub use tagged::{to_tagged, to_tagged_string};
pub use text::{to_text, TextRenderer};

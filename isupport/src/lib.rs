#![forbid(unsafe_code)]

pub mod cache;
pub mod consts;
pub mod emit;
pub mod error;
pub mod limits;
pub mod list;
pub mod pack;
pub mod registry;
pub mod token;
pub mod validate;

pub use cache::{ReplyBatch, ReplyCache};
pub use emit::{LineSink, ReplySink, render_line, send_isupport};
pub use error::TokenError;
pub use limits::{OverflowPolicy, PackLimits};
pub use list::{CacheReader, ISupportList};
pub use pack::ReplyCacheBuilder;
pub use registry::TokenRegistry;
pub use token::Token;

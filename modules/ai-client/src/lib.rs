pub mod error;
pub mod groq;
pub mod traits;
pub mod util;

pub use error::AiError;
pub use groq::Groq;
pub use traits::ChatModel;
pub use util::{extract_json_object, strip_code_blocks, truncate_chars};

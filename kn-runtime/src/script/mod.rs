//! # Script 模块
//!
//! 脚本解析与加载。
//!
//! ## 模块结构
//!
//! - [`parser`]：单行语法解析（纯函数）
//! - [`loader`]：整份脚本加载（派发场景指令 + 填充 Sequencer）

pub mod loader;
pub mod parser;

pub use loader::{Stage, load_script_file, load_script_str};
pub use parser::parse_line;

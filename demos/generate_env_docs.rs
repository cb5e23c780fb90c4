//! 环境变量文档生成工具
//!
//! 输出 `WGET_*` 环境变量的 Markdown 文档

use wget::env;

fn main() {
    print!("{}", env::generate_env_docs());
}

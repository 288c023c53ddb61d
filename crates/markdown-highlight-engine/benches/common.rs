// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title !!one!!\n\n## Section\n\nParagraph with !!some!! content and !!more!! of it.\n\n- Bullet !!point!!\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"!!Hello!!\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_line(matches: usize) -> String {
    let mut line = String::new();
    for i in 0..matches {
        line.push_str(&format!("plain text {i} !!marked {i}!! "));
    }
    line
}

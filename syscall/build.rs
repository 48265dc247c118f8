use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // 仅在号表或本脚本变化时重新生成
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/syscall.h.in");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let input_path = PathBuf::from(manifest_dir).join("src/syscall.h.in");
    let content = fs::read_to_string(&input_path)
        .expect("Failed to read src/syscall.h.in");

    // 解析 #define __NR_* 定义
    let mut syscalls = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("#define __NR_") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() >= 2 {
                syscalls.push((parts[0].to_uppercase(), parts[1].to_string()));
            }
        }
    }

    let mut output = String::new();
    output.push_str("// Auto-generated by build.rs from src/syscall.h.in\n\n");
    output.push_str("impl crate::SyscallId {\n");
    for (name, value) in syscalls {
        output.push_str(&format!(
            "    pub const {}: crate::SyscallId = crate::SyscallId({});\n",
            name, value
        ));
    }
    output.push_str("}\n");

    // 生成到 OUT_DIR，由 lib.rs include!
    let output_path = PathBuf::from(env::var("OUT_DIR").unwrap()).join("syscalls.rs");
    fs::write(&output_path, output).expect("Failed to write syscalls.rs");
}
